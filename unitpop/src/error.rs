//! Error types for the popup application

use thiserror::Error;
use unitpop_prefs::PrefsError;
use unitpop_units::ConversionError;

#[derive(Error, Debug)]
pub enum PopupError {
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error(transparent)]
    Preferences(#[from] PrefsError),
}
