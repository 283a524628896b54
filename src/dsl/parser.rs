//! Construction of [`Branch`] values from definition lines.

use std::str::FromStr;

use tracing::{debug, warn};

use super::ast::{ArrayShape, Branch, Modifiers, ScalarType};
use super::grammar::match_branch;
use crate::error::{BranchgenError, RejectReason, Result};

impl Branch {
    /// Parse a single definition line.
    ///
    /// Fails with [`BranchgenError::DefinitionRejected`] when the line does
    /// not follow the grammar or names an unknown type code.
    pub fn parse(line: &str) -> Result<Self> {
        let caps = match_branch(line)
            .ok_or_else(|| BranchgenError::rejected(line.trim_end(), RejectReason::GrammarMismatch))?;

        let scalar = ScalarType::from_code(caps.type_code).ok_or_else(|| {
            BranchgenError::rejected(
                line.trim_end(),
                RejectReason::UnknownType(caps.type_code.to_string()),
            )
        })?;

        let shape = ArrayShape::from_tokens(caps.dimensions.iter().copied());
        let modifiers = parse_modifiers(caps.name, caps.modifiers);

        let default_value = if caps.initializer.is_empty() {
            scalar.zero_literal().to_string()
        } else {
            caps.initializer.to_string()
        };
        let init_statement = init_statement(caps.name, &shape, &default_value);

        Ok(Branch {
            name: caps.name.to_string(),
            scalar,
            shape,
            modifiers,
            initializer: caps.initializer.to_string(),
            comment: caps.comment.to_string(),
            default_value,
            init_statement,
        })
    }

    /// Parse a line that may belong to another definition kind.
    ///
    /// Returns `Ok(None)` when the line is rejected, so the caller can try
    /// the next definition kind. Other errors are passed on.
    pub fn try_parse(line: &str) -> Result<Option<Self>> {
        match Self::parse(line) {
            Ok(branch) => Ok(Some(branch)),
            Err(e) if e.is_rejection() => Ok(None),
            Err(e) => Err(e),
        }
    }
}

impl FromStr for Branch {
    type Err = BranchgenError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

fn parse_modifiers(name: &str, letters: &str) -> Modifiers {
    let mut modifiers = Modifiers::default();
    for ch in letters.chars() {
        match ch {
            Modifiers::TRANSIENT => modifiers.transient = true,
            Modifiers::MUTABLE => modifiers.mutable = true,
            other => warn!(branch = name, modifier = %other, "ignoring unknown modifier"),
        }
    }
    modifiers
}

/// Build the statement resetting a branch to `value`.
///
/// Arrays get one range-for per dimension, outermost first, e.g.
/// `for (auto& p0 : x) for (auto& p1 : p0) p1 = 0;`.
fn init_statement(name: &str, shape: &ArrayShape, value: &str) -> String {
    if shape.is_scalar() {
        return format!("{} = {};", name, value);
    }

    let mut statement = String::new();
    let mut range = name.to_string();
    for depth in 0..shape.rank() {
        statement.push_str(&format!("for (auto& p{} : {}) ", depth, range));
        range = format!("p{}", depth);
    }
    statement.push_str(&format!("{} = {};", range, value));
    statement
}

/// Parse a definition source, one branch per non-blank line.
///
/// Lines are trimmed before matching. The first rejected line aborts with
/// its 1-based line number.
pub fn parse_branches(input: &str) -> Result<Vec<Branch>> {
    let mut branches = Vec::new();

    for (index, raw) in input.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        match Branch::parse(line) {
            Ok(branch) => {
                debug!(line = index + 1, branch = branch.name(), "accepted branch definition");
                branches.push(branch);
            }
            Err(BranchgenError::DefinitionRejected { reason, .. }) => {
                debug!(line = index + 1, %reason, "rejected branch definition");
                return Err(BranchgenError::parse(
                    index + 1,
                    format!("'{}' {}", line, reason),
                ));
            }
            Err(e) => return Err(e),
        }
    }

    Ok(branches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl::Dimension;

    #[test]
    fn test_parse_array_branch() {
        let branch = Branch::parse("pt[4]/F").unwrap();
        assert_eq!(branch.name(), "pt");
        assert_eq!(branch.scalar_type(), ScalarType::Float32);
        assert_eq!(
            branch.shape().iter().collect::<Vec<_>>(),
            vec![&Dimension::Literal {
                text: "4".to_string(),
                value: 4
            }]
        );
        assert_eq!(branch.modifiers(), Modifiers::default());
        assert_eq!(branch.initializer(), "");
        assert_eq!(branch.comment(), "");
        assert_eq!(branch.default_value(), "0.");
    }

    #[test]
    fn test_parse_initializer_and_comment() {
        let branch = Branch::parse("n/I = 5 // count").unwrap();
        assert_eq!(branch.name(), "n");
        assert_eq!(branch.scalar_type(), ScalarType::Int32);
        assert_eq!(branch.default_value(), "5");
        assert_eq!(branch.initializer(), "5");
        assert_eq!(branch.comment(), " // count");
        assert_eq!(branch.init_statement(), "n = 5;");
    }

    #[test]
    fn test_default_values_by_type() {
        assert_eq!(Branch::parse("flag/O").unwrap().default_value(), "false");
        assert_eq!(Branch::parse("e/D").unwrap().default_value(), "0.");
        assert_eq!(Branch::parse("id/l").unwrap().default_value(), "0");
        assert_eq!(Branch::parse("flag/O = true").unwrap().default_value(), "true");
        assert_eq!(Branch::parse("e/D = 1.5").unwrap().default_value(), "1.5");
    }

    #[test]
    fn test_unknown_type_rejected() {
        let err = Branch::parse("x/Q").unwrap_err();
        match err {
            BranchgenError::DefinitionRejected { definition, reason } => {
                assert_eq!(definition, "x/Q");
                assert_eq!(reason, RejectReason::UnknownType("Q".to_string()));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(Branch::try_parse("n/I=5").unwrap().is_none());
    }

    #[test]
    fn test_grammar_mismatch_rejected() {
        let err = Branch::parse("not a branch").unwrap_err();
        assert!(err.is_rejection());
        assert!(Branch::try_parse("<BranchName>").unwrap().is_none());
    }

    #[test]
    fn test_try_parse_accepts_branch() {
        let branch = Branch::try_parse("pt/F").unwrap().unwrap();
        assert_eq!(branch.name(), "pt");
    }

    #[test]
    fn test_dimension_spelling_preserved() {
        let branch = Branch::parse("h[010]/I").unwrap();
        assert_eq!(branch.value_type(), "std::array<Int_t, 010>");
        assert_eq!(branch.shape().to_string(), "[010]");
    }

    #[test]
    fn test_dimension_expression_with_spaces() {
        let branch = Branch::parse("x[2 * N]/F").unwrap();
        assert_eq!(
            branch.shape().iter().collect::<Vec<_>>(),
            vec![&Dimension::Symbol("2 * N".to_string())]
        );
        assert_eq!(branch.value_type(), "std::array<Float_t, 2 * N>");
    }

    #[test]
    fn test_nested_init_statement() {
        let branch = Branch::parse("hits[4][nMax]/I").unwrap();
        assert_eq!(
            branch.init_statement(),
            "for (auto& p0 : hits) for (auto& p1 : p0) p1 = 0;"
        );
        assert_eq!(branch.init_statement().matches("for (").count(), 2);
    }

    #[test]
    fn test_modifiers_any_order() {
        let a = Branch::parse("x/F/!m").unwrap();
        let b = Branch::parse("x/F/m!").unwrap();
        assert_eq!(a.modifiers(), b.modifiers());
        assert!(a.is_transient());
        assert!(a.is_mutable());
    }

    #[test]
    fn test_unknown_modifier_ignored() {
        let branch = Branch::parse("x/F/mq").unwrap();
        assert!(branch.is_mutable());
        assert!(!branch.is_transient());
    }

    #[test]
    fn test_from_str() {
        let branch: Branch = "charge/B".parse().unwrap();
        assert_eq!(branch.scalar_type(), ScalarType::Int8);
    }

    #[test]
    fn test_parse_branches_keeps_order() {
        let input = "pt/F\n\n  eta/F  \nphi/F\n";
        let names: Vec<_> = parse_branches(input)
            .unwrap()
            .iter()
            .map(|b| b.name().to_string())
            .collect();
        assert_eq!(names, vec!["pt", "eta", "phi"]);
    }

    #[test]
    fn test_parse_branches_reports_line() {
        let err = parse_branches("pt/F\nbogus/Z\n").unwrap_err();
        match err {
            BranchgenError::ParseError { line, message } => {
                assert_eq!(line, 2);
                assert!(message.contains("bogus/Z"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
