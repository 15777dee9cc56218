//! 命令补全器
//!
//! 基于 rustyline 实现 Tab 补全功能

use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

/// 命令列表
const COMMANDS: &[&str] = &[
    "help", "quit", "exit", "info", "stats",
    "addv", "adde", "remv", "reme", "neighbors",
    "set", "get", "props", "rm", "clear",
    "index", "setindex", "lookup", "filterv", "filtere",
    "weightfield", "defaultweight", "path",
    "save", "load",
];

/// 目标关键字
const TARGETS: &[&str] = &["g", "v", "e"];

/// 需要目标参数的命令
fn takes_target(cmd: &str) -> bool {
    matches!(cmd, "set" | "get" | "props" | "rm" | "clear")
}

fn pairs(candidates: &[&str], prefix: &str) -> Vec<Pair> {
    candidates
        .iter()
        .filter(|c| c.starts_with(prefix))
        .map(|c| Pair {
            display: c.to_string(),
            replacement: c.to_string(),
        })
        .collect()
}

/// MetaGraph CLI 补全器
#[derive(Default)]
pub struct CommandCompleter;

impl CommandCompleter {
    pub fn new() -> Self {
        Self
    }
}

impl Completer for CommandCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line_to_cursor = &line[..pos];
        let words: Vec<&str> = line_to_cursor.split_whitespace().collect();
        let at_word_end = !line_to_cursor.is_empty() && !line_to_cursor.ends_with(' ');

        match (words.as_slice(), at_word_end) {
            ([], _) => Ok((pos, pairs(COMMANDS, ""))),
            ([current], true) => {
                let current = current.to_lowercase();
                Ok((pos - current.len(), pairs(COMMANDS, &current)))
            }
            ([cmd], false) if takes_target(&cmd.to_lowercase()) => Ok((pos, pairs(TARGETS, ""))),
            ([cmd, current], true) if takes_target(&cmd.to_lowercase()) => {
                Ok((pos - current.len(), pairs(TARGETS, current)))
            }
            _ => Ok((pos, vec![])),
        }
    }
}

impl Hinter for CommandCompleter {
    type Hint = String;
}

impl Highlighter for CommandCompleter {}

impl Validator for CommandCompleter {}

impl Helper for CommandCompleter {}

#[cfg(test)]
mod tests {
    use super::*;
    use rustyline::history::DefaultHistory;

    fn complete(line: &str) -> (usize, Vec<String>) {
        let history = DefaultHistory::new();
        let ctx = Context::new(&history);
        let (start, pairs) = CommandCompleter::new().complete(line, line.len(), &ctx).unwrap();
        (start, pairs.into_iter().map(|p| p.replacement).collect())
    }

    #[test]
    fn test_complete_command() {
        assert_eq!(complete("set"), (0, vec!["set".to_string(), "setindex".to_string()]));
        assert_eq!(complete("fil").1, vec!["filterv".to_string(), "filtere".to_string()]);
    }

    #[test]
    fn test_complete_target() {
        assert_eq!(complete("get ").1.len(), 3);
        assert_eq!(complete("props v"), (6, vec!["v".to_string()]));
        assert!(complete("adde 1 ").1.is_empty());
    }
}
