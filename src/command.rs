//! Parsing of batch command lines.
//!
//! ```text
//! create <store>
//! delete <store>
//! insert <key> <value> into <store>
//! get <key> from <store>
//! exists <key> in <store>
//! ```
//!
//! Keywords and the `into`/`from`/`in` literals are case-insensitive.

use crate::error::CommandError;

const INSERT_USAGE: &str = "insert [key] [value] into [store]";
const GET_USAGE: &str = "get [key] from [store]";
const EXISTS_USAGE: &str = "exists [key] in [store]";

/// One parsed command, borrowing its tokens from the input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    Create { store: &'a str },
    Delete { store: &'a str },
    Insert { key: &'a str, value: &'a str, store: &'a str },
    Get { key: &'a str, store: &'a str },
    Exists { key: &'a str, store: &'a str },
}

impl<'a> Command<'a> {
    pub fn parse(line: &'a str) -> Result<Self, CommandError> {
        let mut tokens = line.split_whitespace();
        let keyword = tokens
            .next()
            .ok_or(CommandError::UnknownCommand)?
            .to_ascii_lowercase();
        let args: Vec<&'a str> = tokens.collect();

        match (keyword.as_str(), args.as_slice()) {
            ("create", &[store]) => Ok(Command::Create { store }),
            ("delete", &[store]) => Ok(Command::Delete { store }),
            ("insert", &[key, value, into, store]) => {
                expect_literal(into, "into", INSERT_USAGE)?;
                Ok(Command::Insert { key, value, store })
            }
            ("get", &[key, from, store]) => {
                expect_literal(from, "from", GET_USAGE)?;
                Ok(Command::Get { key, store })
            }
            ("exists", &[key, inside, store]) => {
                expect_literal(inside, "in", EXISTS_USAGE)?;
                Ok(Command::Exists { key, store })
            }
            ("create" | "delete" | "insert" | "get" | "exists", _) => {
                Err(CommandError::ArgumentCount)
            }
            _ => Err(CommandError::UnknownCommand),
        }
    }

    /// Store the command operates on.
    pub fn store(&self) -> &'a str {
        match *self {
            Command::Create { store }
            | Command::Delete { store }
            | Command::Insert { store, .. }
            | Command::Get { store, .. }
            | Command::Exists { store, .. } => store,
        }
    }
}

fn expect_literal(token: &str, literal: &str, usage: &'static str) -> Result<(), CommandError> {
    if token.eq_ignore_ascii_case(literal) {
        Ok(())
    } else {
        Err(CommandError::MissingKeyword { usage })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_commands() {
        assert_eq!(Command::parse("create A"), Ok(Command::Create { store: "A" }));
        assert_eq!(Command::parse("delete A"), Ok(Command::Delete { store: "A" }));
        assert_eq!(
            Command::parse("insert cat 1 into A"),
            Ok(Command::Insert {
                key: "cat",
                value: "1",
                store: "A"
            })
        );
        assert_eq!(
            Command::parse("get cat from A"),
            Ok(Command::Get { key: "cat", store: "A" })
        );
        assert_eq!(
            Command::parse("exists cat in A"),
            Ok(Command::Exists { key: "cat", store: "A" })
        );
    }

    #[test]
    fn test_parse_is_case_insensitive_and_whitespace_tolerant() {
        assert_eq!(
            Command::parse("  INSERT\tcat  1 INTO   A "),
            Ok(Command::Insert {
                key: "cat",
                value: "1",
                store: "A"
            })
        );
        assert_eq!(
            Command::parse("Get Cat From A"),
            Ok(Command::Get { key: "Cat", store: "A" })
        );
    }

    #[test]
    fn test_parse_argument_count() {
        assert_eq!(Command::parse("create"), Err(CommandError::ArgumentCount));
        assert_eq!(Command::parse("create A B"), Err(CommandError::ArgumentCount));
        assert_eq!(Command::parse("insert cat into A"), Err(CommandError::ArgumentCount));
        assert_eq!(Command::parse("get cat A"), Err(CommandError::ArgumentCount));
        assert_eq!(Command::parse("exists cat in A B"), Err(CommandError::ArgumentCount));
    }

    #[test]
    fn test_parse_missing_literal() {
        let err = Command::parse("insert cat 1 to A").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid command(should be like: insert [key] [value] into [store])"
        );
        assert_eq!(
            Command::parse("get cat in A"),
            Err(CommandError::MissingKeyword { usage: GET_USAGE })
        );
        assert_eq!(
            Command::parse("exists cat from A"),
            Err(CommandError::MissingKeyword { usage: EXISTS_USAGE })
        );
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(Command::parse("drop A"), Err(CommandError::UnknownCommand));
        assert_eq!(Command::parse(""), Err(CommandError::UnknownCommand));
        assert_eq!(Command::parse("   "), Err(CommandError::UnknownCommand));
    }

    #[test]
    fn test_store_accessor() {
        assert_eq!(Command::parse("exists k in S").unwrap().store(), "S");
        assert_eq!(Command::parse("create T").unwrap().store(), "T");
    }
}
