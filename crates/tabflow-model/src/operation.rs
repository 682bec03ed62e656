//! Operation kinds and bound operations.
//!
//! An [`Operation`] is a configuration record whose parameters have been
//! extracted and fixed. It serializes back to the record form, so a built
//! pipeline can be written out or inspected.

use serde::{Deserialize, Serialize};

/// The closed set of operations a pipeline can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    RenameColumn,
    SumColumns,
    CountLetter,
    DropColumns,
}

impl OperationKind {
    /// All kinds, in dispatch order.
    pub const ALL: [Self; 4] = [
        Self::RenameColumn,
        Self::SumColumns,
        Self::CountLetter,
        Self::DropColumns,
    ];

    /// The `function` value that selects this kind.
    pub fn name(self) -> &'static str {
        match self {
            Self::RenameColumn => "rename_column",
            Self::SumColumns => "sum_columns",
            Self::CountLetter => "count_letter",
            Self::DropColumns => "drop_columns",
        }
    }

    /// Look a kind up by its `function` value. Matching is exact.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Fields a record of this kind must carry, besides `function`.
    pub fn required_fields(self) -> &'static [&'static str] {
        match self {
            Self::RenameColumn => &["source", "target"],
            Self::SumColumns => &["sources", "target"],
            Self::CountLetter => &["source", "letter", "target"],
            Self::DropColumns => &["columns_to_drop"],
        }
    }

    /// One-line description for listings.
    pub fn description(self) -> &'static str {
        match self {
            Self::RenameColumn => "Rename column `source` to `target`",
            Self::SumColumns => "Add column `target` as the row-wise sum of `sources`",
            Self::CountLetter => {
                "Add column `target` counting `letter` in each value of `source`"
            }
            Self::DropColumns => "Remove every column in `columns_to_drop`",
        }
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A bound operation: one kind plus its fixed parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "function", rename_all = "snake_case")]
pub enum Operation {
    RenameColumn {
        source: String,
        target: String,
    },
    SumColumns {
        sources: Vec<String>,
        target: String,
    },
    CountLetter {
        source: String,
        letter: char,
        target: String,
    },
    DropColumns {
        columns_to_drop: Vec<String>,
    },
}

impl Operation {
    pub fn kind(&self) -> OperationKind {
        match self {
            Self::RenameColumn { .. } => OperationKind::RenameColumn,
            Self::SumColumns { .. } => OperationKind::SumColumns,
            Self::CountLetter { .. } => OperationKind::CountLetter,
            Self::DropColumns { .. } => OperationKind::DropColumns,
        }
    }

    /// Short human-readable rendering of the parameters.
    pub fn describe(&self) -> String {
        match self {
            Self::RenameColumn { source, target } => format!("{source} -> {target}"),
            Self::SumColumns { sources, target } => {
                format!("{} -> {target}", sources.join(" + "))
            }
            Self::CountLetter {
                source,
                letter,
                target,
            } => format!("count '{letter}' in {source} -> {target}"),
            Self::DropColumns { columns_to_drop } => format!("drop {}", columns_to_drop.join(", ")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names_round_trip() {
        for kind in OperationKind::ALL {
            assert_eq!(OperationKind::from_name(kind.name()), Some(kind));
        }
    }

    #[test]
    fn kind_lookup_is_exact() {
        assert_eq!(OperationKind::from_name("Rename_Column"), None);
        assert_eq!(OperationKind::from_name("no_op_kind"), None);
        assert_eq!(OperationKind::from_name(""), None);
    }

    #[test]
    fn operation_serializes_as_record() {
        let op = Operation::CountLetter {
            source: "word_1".to_string(),
            letter: 't',
            target: "t_count_1".to_string(),
        };
        insta::assert_json_snapshot!(op, @r#"
        {
          "function": "count_letter",
          "source": "word_1",
          "letter": "t",
          "target": "t_count_1"
        }
        "#);
    }

    #[test]
    fn describe_is_compact() {
        let op = Operation::SumColumns {
            sources: vec!["a".to_string(), "b".to_string()],
            target: "total".to_string(),
        };
        assert_eq!(op.describe(), "a + b -> total");
        assert_eq!(op.kind(), OperationKind::SumColumns);
    }
}
