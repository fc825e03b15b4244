mod comments;
mod composer;
mod error;
mod event;
mod node;
mod options;
mod parser;
mod scanner;
mod token;

pub use comments::{classify, Awaiting, Classification, CommentKind, CommentLine, Context};
pub use composer::Composer;
pub use error::{ComposeError, GrammarError};
pub use event::{Event, EventId};
pub use node::{MappingNode, Node, ScalarNode, SequenceNode};
pub use options::{ComposerOptions, EmptyDocumentPolicy, ParserOptions};
pub use parser::Parser;
pub use scanner::Scanner;
pub use token::{CommentToken, LexicalSource, Mark, ScalarStyle, Token, TokenKind, TokenList};

/// Parses `input` into its full event stream, comments included.
pub fn parse_events(input: &str) -> Result<Vec<(Event, Mark)>, GrammarError> {
    Parser::new(Scanner::new(input)).collect()
}

/// Composes every document in `input`.
pub fn compose_all(input: &str) -> Result<Vec<Node>, ComposeError> {
    compose_all_with(input, ComposerOptions::default())
}

/// Like [`compose_all`], with explicit composer options.
pub fn compose_all_with(input: &str, options: ComposerOptions) -> Result<Vec<Node>, ComposeError> {
    Composer::with_options(Parser::new(Scanner::new(input)), options).compose_all()
}

/// Composes the single document in `input`; see [`Composer::compose_single`].
pub fn compose_single(input: &str) -> Result<Option<Node>, ComposeError> {
    Composer::new(Parser::new(Scanner::new(input))).compose_single()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_every_comment_of_a_small_document() {
        let input = r#"
# preface
defaults: # inline
    # nested
    alignment: "TRUE NEUTRAL"
    # closing
"#;

        let nodes = compose_all(input).expect("compose should succeed");
        assert_eq!(nodes.len(), 1);
        let texts: Vec<&str> = nodes[0].comments().iter().map(|c| c.text()).collect();
        assert_eq!(texts, ["", "preface", "inline", "nested", "closing"]);
    }
}
