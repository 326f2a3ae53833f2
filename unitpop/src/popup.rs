//! Popup converter state

use serde::Serialize;
use tracing::debug;
use unitpop_core::DEFAULT_PRECISION;
use unitpop_units::{convert_text, Category, ConversionError, UNITS};

/// Everything the popup shows, after the last input event
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopupState {
    pub category: Category,
    pub from_unit: &'static str,
    pub to_unit: &'static str,
    /// Raw text of the value field
    pub input: String,
    /// Rendered result; empty when the input is not a number
    pub result: String,
    pub precision: u32,
}

/// Converter driven by user events: category and unit picks, typing, swap
#[derive(Debug, Clone)]
pub struct Popup {
    state: PopupState,
}

impl Popup {
    /// Opens on the first category with its default units
    pub fn new() -> Result<Self, ConversionError> {
        Self::with_category(Category::ALL[0])
    }

    pub fn with_category(category: Category) -> Result<Self, ConversionError> {
        let (from, to) = UNITS.default_pair(category)?;
        Ok(Self {
            state: PopupState {
                category,
                from_unit: from.id,
                to_unit: to.id,
                input: String::new(),
                result: String::new(),
                precision: DEFAULT_PRECISION,
            },
        })
    }

    pub fn with_precision(mut self, places: u32) -> Result<Self, ConversionError> {
        let next = PopupState { precision: places, ..self.state.clone() };
        self.commit(next)?;
        Ok(self)
    }

    pub fn state(&self) -> &PopupState {
        &self.state
    }

    /// Repopulate the unit pickers: first unit as source, second as target
    pub fn select_category(&mut self, category: Category) -> Result<(), ConversionError> {
        let (from, to) = UNITS.default_pair(category)?;
        let next = PopupState {
            category,
            from_unit: from.id,
            to_unit: to.id,
            ..self.state.clone()
        };
        self.commit(next)?;
        debug!(%category, from = from.id, to = to.id, "category selected");
        Ok(())
    }

    pub fn set_input(&mut self, text: &str) -> Result<(), ConversionError> {
        let next = PopupState { input: text.to_string(), ..self.state.clone() };
        self.commit(next)
    }

    pub fn set_from_unit(&mut self, unit: &str) -> Result<(), ConversionError> {
        let from_unit = UNITS.get(self.state.category, unit)?.id;
        let next = PopupState { from_unit, ..self.state.clone() };
        self.commit(next)
    }

    pub fn set_to_unit(&mut self, unit: &str) -> Result<(), ConversionError> {
        let to_unit = UNITS.get(self.state.category, unit)?.id;
        let next = PopupState { to_unit, ..self.state.clone() };
        self.commit(next)
    }

    /// Exchange the units; a shown result becomes the new input
    pub fn swap(&mut self) -> Result<(), ConversionError> {
        let mut next = self.state.clone();
        std::mem::swap(&mut next.from_unit, &mut next.to_unit);
        if !next.result.is_empty() {
            next.input = std::mem::take(&mut next.result);
        }
        self.commit(next)
    }

    /// Recompute the result for `next` and install it; on error nothing changes
    fn commit(&mut self, next: PopupState) -> Result<(), ConversionError> {
        let result = convert_text(next.category, next.from_unit, next.to_unit, &next.input, next.precision)?;
        self.state = PopupState { result, ..next };
        Ok(())
    }
}
