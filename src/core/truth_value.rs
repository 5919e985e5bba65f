//! # TruthValue — Grau de Verdade Simples do AtomSpace
//!
//! Todo átomo no AtomSpace carrega um **SimpleTruthValue**: o par
//! `(strength, confidence)`, ambos no intervalo `[0, 1]`.
//!
//! - **Strength (s)**: "Quão verdadeira é a proposição?"
//! - **Confidence (c)**: "Quanta evidência sustenta essa avaliação?"
//!
//! A ponte **transporta** esse par, mas não calcula sobre ele: átomos
//! criados localmente nascem com `⟨1.00, 1.00⟩` e não são alterados depois.
//!
//! ## Exemplo
//!
//! ```rust
//! use atomspace_bridge::core::TruthValue;
//!
//! let tv = TruthValue::default();
//! assert_eq!(tv.to_string(), "⟨1.00, 1.00⟩");
//!
//! // Valores fora do intervalo são limitados (clamped)
//! let tv = TruthValue::new(1.7, -0.2);
//! assert_eq!((tv.strength(), tv.confidence()), (1.0, 0.0));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Par `(strength, confidence)` anexado a nós e links.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TruthValue {
    strength: f64,
    confidence: f64,
}

impl TruthValue {
    /// Cria um TruthValue, limitando ambos os componentes a `[0, 1]`.
    ///
    /// `NaN` é tratado como `0.0`.
    pub fn new(strength: f64, confidence: f64) -> Self {
        Self {
            strength: unit_interval(strength),
            confidence: unit_interval(confidence),
        }
    }

    pub fn strength(&self) -> f64 {
        self.strength
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }
}

/// Átomos novos nascem com certeza total: `⟨1.00, 1.00⟩`.
impl Default for TruthValue {
    fn default() -> Self {
        Self {
            strength: 1.0,
            confidence: 1.0,
        }
    }
}

impl fmt::Display for TruthValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "⟨{:.2}, {:.2}⟩", self.strength, self.confidence)
    }
}

fn unit_interval(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Átomos recém-criados têm strength e confidence máximos
    #[test]
    fn test_default_is_full_certainty() {
        let tv = TruthValue::default();
        assert_eq!(tv.strength(), 1.0);
        assert_eq!(tv.confidence(), 1.0);
    }

    #[test]
    fn test_clamps_to_unit_interval() {
        let tv = TruthValue::new(2.5, -1.0);
        assert_eq!(tv.strength(), 1.0);
        assert_eq!(tv.confidence(), 0.0);

        let tv = TruthValue::new(f64::NAN, 0.4);
        assert_eq!(tv.strength(), 0.0);
        assert_eq!(tv.confidence(), 0.4);
    }

    #[test]
    fn test_display() {
        let tv = TruthValue::new(0.8, 0.45);
        assert_eq!(tv.to_string(), "⟨0.80, 0.45⟩");
    }
}
