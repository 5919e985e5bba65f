//! # Tradutor — Notação do Host ⇄ Notação de Wire
//!
//! Reescrita textual **pura** entre a notação simbólica do host Wolf e os
//! identificadores que o CogServer entende.
//!
//! ## Tabela de Símbolos
//!
//! | Host | Wire |
//! |------|------|
//! | `∇` | `GradientOperator` |
//! | `∂` | `PartialDerivative` |
//! | `⊗` | `TensorProduct` |
//! | `Φ` | `PhiFunction` |
//! | `Ω` | `OmegaSpace` |
//! | `∑` | `SummationOperator` |
//!
//! ## Embrulho de Termos Simples
//!
//! Depois da substituição, um texto sem `(` é embrulhado como conceito:
//!
//! ```text
//! "∇f"  →  "GradientOperatorf"  →  (ConceptNode "GradientOperatorf")
//! ```
//!
//! [`from_wire`] aplica a tabela inversa e remove esse embrulho quando o
//! texto começa com `(ConceptNode "` e termina com `")`.
//!
//! ## Limitação Conhecida
//!
//! `from_wire(to_wire(x)) == x` só vale quando `x` não contém parênteses e
//! não contém, por acaso, um identificador da tabela (ex: o texto literal
//! `"OmegaSpace"` volta como `"Ω"`).

/// Símbolos do host e seus identificadores de wire, em ordem fixa.
pub const SYMBOL_TABLE: [(&str, &str); 6] = [
    ("∇", "GradientOperator"),
    ("∂", "PartialDerivative"),
    ("⊗", "TensorProduct"),
    ("Φ", "PhiFunction"),
    ("Ω", "OmegaSpace"),
    ("∑", "SummationOperator"),
];

const WRAP_PREFIX: &str = "(ConceptNode \"";
const WRAP_SUFFIX: &str = "\")";

/// Tradutor sem estado. Existe para quem prefere passar um valor em vez de
/// chamar as funções livres.
#[derive(Clone, Copy, Debug, Default)]
pub struct Translator;

impl Translator {
    pub fn to_wire(&self, expr: &str) -> String {
        to_wire(expr)
    }

    pub fn from_wire(&self, data: &str) -> String {
        from_wire(data)
    }
}

/// Host → wire: substitui os símbolos e embrulha termos simples.
///
/// ```rust
/// use atomspace_bridge::translator::to_wire;
///
/// assert_eq!(to_wire("X"), r#"(ConceptNode "X")"#);
/// assert_eq!(to_wire("∇"), r#"(ConceptNode "GradientOperator")"#);
/// assert_eq!(to_wire("(Ω)"), "(OmegaSpace)");
/// ```
pub fn to_wire(expr: &str) -> String {
    let substituted = SYMBOL_TABLE
        .iter()
        .fold(expr.to_string(), |acc, (host, wire)| acc.replace(host, wire));

    // o teste de parênteses roda depois da substituição
    if substituted.contains('(') {
        substituted
    } else {
        format!("{WRAP_PREFIX}{substituted}{WRAP_SUFFIX}")
    }
}

/// Wire → host: tabela inversa e remoção do embrulho de conceito.
///
/// ```rust
/// use atomspace_bridge::translator::from_wire;
///
/// assert_eq!(from_wire(r#"(ConceptNode "X")"#), "X");
/// assert_eq!(from_wire("(TensorProduct a b)"), "(⊗ a b)");
/// ```
pub fn from_wire(data: &str) -> String {
    let substituted = SYMBOL_TABLE
        .iter()
        .fold(data.to_string(), |acc, (host, wire)| acc.replace(wire, host));

    unwrap_concept(&substituted)
        .map(str::to_string)
        .unwrap_or(substituted)
}

/// Remove o embrulho `(ConceptNode "…")`, se presente por inteiro.
///
/// Entradas mais curtas que prefixo + sufixo nunca casam, então
/// `(ConceptNode ")` volta inalterado em vez de ter prefixo e sufixo
/// sobrepostos.
fn unwrap_concept(text: &str) -> Option<&str> {
    if text.len() < WRAP_PREFIX.len() + WRAP_SUFFIX.len() {
        return None;
    }
    text.strip_prefix(WRAP_PREFIX)?.strip_suffix(WRAP_SUFFIX)
}
