use cat_env::{CatError, CatResult};
use serde::{Deserialize, Serialize};

/// The canonical parameter tuple (zeta) of a single item: discrimination
/// `a`, difficulty `b`, lower asymptote `c` (guessing), upper asymptote
/// `d` (slipping). Internally this is the only representation used; the
/// dual symbolic/semantic spelling only exists at the boundary, in
/// [`ItemParamsInput`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ItemParams {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl Default for ItemParams {
    fn default() -> Self {
        ItemParams {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
        }
    }
}

/// Whether a missing quantity should be defaulted or rejected.
///
/// Lenient mode is the engine's normal operating mode (spec §3: "missing
/// fields default"). Strict mode exists for hosts that calibrate items
/// upstream and want a hard failure if a quantity was dropped in transit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    Lenient,
    Strict,
}

/// The wire shape of an item's parameters: callers may use either the
/// symbolic spelling (`a`, `b`, `c`, `d`) or the semantic one
/// (`discrimination`, `difficulty`, `guessing`, `slipping`), but never
/// both for the same quantity on the same item.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemParamsInput {
    #[serde(default)]
    pub a: Option<f64>,
    #[serde(default)]
    pub b: Option<f64>,
    #[serde(default)]
    pub c: Option<f64>,
    #[serde(default)]
    pub d: Option<f64>,
    #[serde(default)]
    pub discrimination: Option<f64>,
    #[serde(default)]
    pub difficulty: Option<f64>,
    #[serde(default)]
    pub guessing: Option<f64>,
    #[serde(default)]
    pub slipping: Option<f64>,
}

fn resolve_field(
    field: &str,
    symbolic: Option<f64>,
    semantic: Option<f64>,
    default: f64,
    mode: ValidationMode,
) -> CatResult<f64> {
    match (symbolic, semantic) {
        (Some(_), Some(_)) => Err(CatError::RedundantKeys {
            field: field.to_string(),
        }),
        (Some(v), None) | (None, Some(v)) => Ok(v),
        (None, None) => match mode {
            ValidationMode::Lenient => Ok(default),
            ValidationMode::Strict => Err(CatError::MissingKeys {
                field: field.to_string(),
            }),
        },
    }
}

impl ItemParamsInput {
    /// Canonicalize into the fixed four-float struct, defaulting missing
    /// fields (lenient) or rejecting them (strict), and rejecting any
    /// quantity spelled both ways.
    pub fn canonicalize(&self, mode: ValidationMode) -> CatResult<ItemParams> {
        let defaults = ItemParams::default();
        Ok(ItemParams {
            a: resolve_field("a", self.a, self.discrimination, defaults.a, mode)?,
            b: resolve_field("b", self.b, self.difficulty, defaults.b, mode)?,
            c: resolve_field("c", self.c, self.guessing, defaults.c, mode)?,
            d: resolve_field("d", self.d, self.slipping, defaults.d, mode)?,
        })
    }
}

impl TryFrom<ItemParamsInput> for ItemParams {
    type Error = CatError;

    fn try_from(input: ItemParamsInput) -> Result<Self, Self::Error> {
        input.canonicalize(ValidationMode::Lenient)
    }
}

impl From<ItemParams> for ItemParamsInput {
    fn from(p: ItemParams) -> Self {
        ItemParamsInput {
            a: Some(p.a),
            b: Some(p.b),
            c: Some(p.c),
            d: Some(p.d),
            discrimination: None,
            difficulty: None,
            guessing: None,
            slipping: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_lenient_and_absent() {
        let input = ItemParamsInput::default();
        let zeta = input.canonicalize(ValidationMode::Lenient).unwrap();
        assert_eq!(zeta, ItemParams::default());
    }

    #[test]
    fn strict_mode_rejects_missing_field() {
        let input = ItemParamsInput {
            a: Some(1.2),
            ..Default::default()
        };
        let err = input.canonicalize(ValidationMode::Strict).unwrap_err();
        assert!(matches!(err, CatError::MissingKeys { field } if field == "b"));
    }

    #[test]
    fn redundant_spelling_is_rejected() {
        let input = ItemParamsInput {
            b: Some(0.5),
            difficulty: Some(0.5),
            ..Default::default()
        };
        let err = input.canonicalize(ValidationMode::Lenient).unwrap_err();
        assert!(matches!(err, CatError::RedundantKeys { field } if field == "b"));
    }

    #[test]
    fn semantic_spelling_is_accepted() {
        let input = ItemParamsInput {
            discrimination: Some(1.5),
            difficulty: Some(-0.3),
            guessing: Some(0.1),
            slipping: Some(0.95),
            ..Default::default()
        };
        let zeta = input.canonicalize(ValidationMode::Lenient).unwrap();
        assert_eq!(
            zeta,
            ItemParams {
                a: 1.5,
                b: -0.3,
                c: 0.1,
                d: 0.95
            }
        );
    }
}
