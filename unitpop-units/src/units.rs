//! Unit definitions, grouped by category

use std::collections::HashMap;
use std::sync::LazyLock;
use crate::{Affine, Category, ConversionError, Unit};

/// Global unit registry
pub static UNITS: LazyLock<UnitRegistry> = LazyLock::new(UnitRegistry::new);

/// Units of one category, in definition order
#[derive(Debug)]
struct CategoryUnits {
    base: &'static str,
    units: Vec<Unit>,
}

/// Registry of all known units
#[derive(Debug)]
pub struct UnitRegistry {
    categories: HashMap<Category, CategoryUnits>,
}

impl UnitRegistry {
    pub fn new() -> Self {
        let mut registry = UnitRegistry {
            categories: HashMap::new(),
        };
        registry.register_all_units();
        registry
    }

    /// Categories in presentation order
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        Category::ALL.into_iter().filter(|c| self.categories.contains_key(c))
    }

    /// Units of a category in definition order.
    /// The first is the default source unit, the second the default target.
    pub fn units_of(&self, category: Category) -> Result<&[Unit], ConversionError> {
        self.entry(category).map(|e| e.units.as_slice())
    }

    /// Base unit identifier of a category
    pub fn base_unit(&self, category: Category) -> Result<&'static str, ConversionError> {
        self.entry(category).map(|e| e.base)
    }

    /// Look up a unit by identifier inside its category
    pub fn get(&self, category: Category, unit: &str) -> Result<&Unit, ConversionError> {
        self.units_of(category)?
            .iter()
            .find(|u| u.id == unit)
            .ok_or_else(|| ConversionError::UnknownUnit {
                category,
                unit: unit.to_string(),
            })
    }

    /// Factor of a linear unit relative to its base unit
    pub fn factor_of(&self, category: Category, unit: &str) -> Result<f64, ConversionError> {
        self.get(category, unit)?
            .factor()
            .ok_or_else(|| ConversionError::WrongKind {
                category,
                unit: unit.to_string(),
                expected: "linear",
            })
    }

    /// Transform pair of a temperature unit
    pub fn temperature_transform(&self, unit: &str) -> Result<Affine, ConversionError> {
        self.get(Category::Temperature, unit)?
            .transform()
            .ok_or_else(|| ConversionError::WrongKind {
                category: Category::Temperature,
                unit: unit.to_string(),
                expected: "affine",
            })
    }

    /// Default (from, to) pair for a category
    pub fn default_pair(&self, category: Category) -> Result<(&Unit, &Unit), ConversionError> {
        let units = self.units_of(category)?;
        match units {
            [first, second, ..] => Ok((first, second)),
            [only] => Ok((only, only)),
            [] => Err(ConversionError::UnknownCategory(category.id().to_string())),
        }
    }

    fn entry(&self, category: Category) -> Result<&CategoryUnits, ConversionError> {
        self.categories
            .get(&category)
            .ok_or_else(|| ConversionError::UnknownCategory(category.id().to_string()))
    }

    fn register(&mut self, category: Category, base: &'static str, units: Vec<Unit>) {
        self.categories.insert(category, CategoryUnits { base, units });
    }

    fn register_all_units(&mut self) {
        self.register_length_units();
        self.register_mass_units();
        self.register_volume_units();
        self.register_cooking_volume_units();
        self.register_speed_units();
        self.register_temperature_units();
    }

    fn register_length_units(&mut self) {
        use Category::Length as C;
        self.register(C, "m", vec![
            Unit::linear("cm", C, 0.01),
            Unit::linear("m", C, 1.0),
            Unit::linear("km", C, 1000.0),
        ]);
    }

    fn register_mass_units(&mut self) {
        use Category::Mass as C;
        self.register(C, "g", vec![
            Unit::linear("g", C, 1.0),
            Unit::linear("kg", C, 1000.0),
            Unit::linear("t", C, 1_000_000.0),
        ]);
    }

    fn register_volume_units(&mut self) {
        use Category::Volume as C;
        self.register(C, "l", vec![
            Unit::linear("ml", C, 0.001),
            Unit::linear("cl", C, 0.01),
            Unit::linear("dl", C, 0.1),
            Unit::linear("l", C, 1.0),
        ]);
    }

    fn register_cooking_volume_units(&mut self) {
        // US customary spoons
        use Category::CookingVolume as C;
        self.register(C, "ml", vec![
            Unit::linear("ml", C, 1.0),
            Unit::linear("tsp", C, 4.92892),
            Unit::linear("tbsp", C, 14.7868),
        ]);
    }

    fn register_speed_units(&mut self) {
        use Category::Speed as C;
        self.register(C, "ms", vec![
            Unit::linear("ms", C, 1.0),
            Unit::linear("kmh", C, 0.277778),
            Unit::linear("mph", C, 0.44704),
        ]);
    }

    fn register_temperature_units(&mut self) {
        // Celsius is the pivot
        use Category::Temperature as C;
        self.register(C, "c", vec![
            Unit::affine("c", C, Affine::IDENTITY),
            Unit::affine("f", C, Affine::new(32.0, 5.0, 9.0)),
            Unit::affine("k", C, Affine::new(273.15, 1.0, 1.0)),
        ]);
    }
}

impl Default for UnitRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Conversion;

    #[test]
    fn test_every_category_registered() {
        let listed: Vec<_> = UNITS.categories().collect();
        assert_eq!(listed, Category::ALL.to_vec());
    }

    #[test]
    fn test_base_unit_has_factor_one() {
        for category in UNITS.categories().filter(|c| c.is_linear()) {
            let base = UNITS.base_unit(category).unwrap();
            assert_eq!(UNITS.factor_of(category, base).unwrap(), 1.0, "{}", category);
        }
        let pivot = UNITS.temperature_transform("c").unwrap();
        assert_eq!(pivot, Affine::IDENTITY);
    }

    #[test]
    fn test_categories_are_not_empty_and_kinds_match() {
        for category in UNITS.categories() {
            let units = UNITS.units_of(category).unwrap();
            assert!(!units.is_empty());
            for unit in units {
                assert_eq!(unit.category, category);
                let linear = matches!(unit.conversion, Conversion::Linear { .. });
                assert_eq!(linear, category.is_linear(), "{} in {}", unit, category);
            }
        }
    }

    #[test]
    fn test_definition_order() {
        let ids: Vec<_> = UNITS.units_of(Category::Volume).unwrap().iter().map(|u| u.id).collect();
        assert_eq!(ids, vec!["ml", "cl", "dl", "l"]);

        let (from, to) = UNITS.default_pair(Category::Temperature).unwrap();
        assert_eq!((from.id, to.id), ("c", "f"));
    }

    #[test]
    fn test_same_id_in_two_categories() {
        assert_eq!(UNITS.factor_of(Category::Volume, "ml").unwrap(), 0.001);
        assert_eq!(UNITS.factor_of(Category::CookingVolume, "ml").unwrap(), 1.0);
    }

    #[test]
    fn test_lookup_errors() {
        assert_eq!(
            UNITS.factor_of(Category::Length, "mi").unwrap_err(),
            ConversionError::UnknownUnit { category: Category::Length, unit: "mi".to_string() }
        );
        assert!(matches!(
            UNITS.factor_of(Category::Temperature, "c"),
            Err(ConversionError::WrongKind { expected: "linear", .. })
        ));
        assert!(matches!(
            UNITS.temperature_transform("r"),
            Err(ConversionError::UnknownUnit { .. })
        ));
    }
}
