//! Matcher for the single-line branch grammar.
//!
//! The matcher only checks syntax and slices the line into captures. Type
//! code lookup and normalization happen in the parser.

/// Raw captures of a line that follows the branch grammar.
///
/// Optional parts that are absent are empty, never missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchCaptures<'a> {
    /// Branch name
    pub name: &'a str,
    /// Dimension tokens, outermost first, without brackets
    pub dimensions: Vec<&'a str>,
    /// Type code as written (not yet checked against the scalar table)
    pub type_code: &'a str,
    /// Modifier letters
    pub modifiers: &'a str,
    /// Initializer literal
    pub initializer: &'a str,
    /// Trailing comment including one leading space, e.g. `" // count"`
    pub comment: &'a str,
}

/// Cursor over the unconsumed part of a line.
struct Cursor<'a> {
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self { rest: input }
    }

    fn peek(&self) -> Option<char> {
        self.rest.chars().next()
    }

    fn eat(&mut self, ch: char) -> bool {
        match self.rest.strip_prefix(ch) {
            Some(rest) => {
                self.rest = rest;
                true
            }
            None => false,
        }
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let end = self
            .rest
            .char_indices()
            .find(|&(_, ch)| !pred(ch))
            .map(|(pos, _)| pos)
            .unwrap_or(self.rest.len());
        let (taken, rest) = self.rest.split_at(end);
        self.rest = rest;
        taken
    }

    fn count_spaces(&self) -> usize {
        self.rest.len() - self.rest.trim_start_matches(' ').len()
    }
}

fn is_name_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

fn is_name_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

fn is_code_char(ch: char) -> bool {
    ch != ' ' && ch != '/'
}

fn is_dimension_char(ch: char) -> bool {
    !matches!(ch, '[' | ']' | '/' | '\n' | '\r')
}

fn is_literal_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '_' | '.' | '-')
}

/// Match a definition line against the branch grammar.
///
/// ```text
/// line        = name { "[" dimension "]" } "/" type_code [ "/" modifiers ] [ initializer ] [ comment ]
/// name        = (letter | '_') { letter | digit | '_' }
/// dimension   = any_char+ except '[' ']' '/' and line breaks, not all blank
/// initializer = ' '+ '=' ' '+ (letter | digit | '_' | '.' | '-')+
/// comment     = ' '+ "//" any_char+
/// ```
///
/// One trailing line terminator is ignored. Returns `None` when the line
/// does not follow the grammar.
pub fn match_branch(line: &str) -> Option<BranchCaptures<'_>> {
    let line = line
        .strip_suffix('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .unwrap_or(line);

    let mut cursor = Cursor::new(line);

    if !cursor.peek().is_some_and(is_name_start) {
        return None;
    }
    let name = cursor.take_while(is_name_char);

    let mut dimensions = Vec::new();
    while cursor.eat('[') {
        let token = cursor.take_while(is_dimension_char);
        if token.trim().is_empty() || !cursor.eat(']') {
            return None;
        }
        dimensions.push(token);
    }

    if !cursor.eat('/') {
        return None;
    }
    let type_code = cursor.take_while(is_code_char);
    if type_code.is_empty() {
        return None;
    }

    let mut modifiers = "";
    if cursor.eat('/') {
        modifiers = cursor.take_while(is_code_char);
        if modifiers.is_empty() {
            return None;
        }
    }

    let mut initializer = "";
    let spaces = cursor.count_spaces();
    if spaces > 0 && cursor.rest[spaces..].starts_with('=') {
        cursor.rest = &cursor.rest[spaces + 1..];
        let spaces = cursor.count_spaces();
        if spaces == 0 {
            return None;
        }
        cursor.rest = &cursor.rest[spaces..];
        initializer = cursor.take_while(is_literal_char);
        if initializer.is_empty() {
            return None;
        }
    }

    let mut comment = "";
    if !cursor.rest.is_empty() {
        let spaces = cursor.count_spaces();
        let body = &cursor.rest[spaces..];
        if spaces == 0 || !body.starts_with("//") || body.len() <= 2 || body.contains('\n') {
            return None;
        }
        // keep exactly one of the separating spaces
        comment = &cursor.rest[spaces - 1..];
    }

    Some(BranchCaptures {
        name,
        dimensions,
        type_code,
        modifiers,
        initializer,
        comment,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_scalar() {
        let caps = match_branch("pt/F").unwrap();
        assert_eq!(caps.name, "pt");
        assert!(caps.dimensions.is_empty());
        assert_eq!(caps.type_code, "F");
        assert_eq!(caps.modifiers, "");
        assert_eq!(caps.initializer, "");
        assert_eq!(caps.comment, "");
    }

    #[test]
    fn test_match_full_line() {
        let caps = match_branch("hits[4][nMax]/s/!m = -1   // per layer\n").unwrap();
        assert_eq!(caps.name, "hits");
        assert_eq!(caps.dimensions, vec!["4", "nMax"]);
        assert_eq!(caps.type_code, "s");
        assert_eq!(caps.modifiers, "!m");
        assert_eq!(caps.initializer, "-1");
        assert_eq!(caps.comment, " // per layer");
    }

    #[test]
    fn test_match_comment_without_initializer() {
        let caps = match_branch("n/I // count").unwrap();
        assert_eq!(caps.initializer, "");
        assert_eq!(caps.comment, " // count");
    }

    #[test]
    fn test_dimension_expression_keeps_spaces() {
        let caps = match_branch("x[2 * N][010]/F").unwrap();
        assert_eq!(caps.dimensions, vec!["2 * N", "010"]);
    }

    #[test]
    fn test_unknown_code_still_matches_grammar() {
        let caps = match_branch("x/Q").unwrap();
        assert_eq!(caps.type_code, "Q");
    }

    #[test]
    fn test_crlf_terminator() {
        let caps = match_branch("n/I = 5\r\n").unwrap();
        assert_eq!(caps.initializer, "5");
    }

    #[test]
    fn test_rejections() {
        for line in [
            "",
            "1x/I",
            " n/I",
            "n",
            "n/",
            "n[]/I",
            "n[ ]/I",
            "n[4/I",
            "n[4]x/I",
            "n/I/",
            "n/I =5",
            "n/I = ",
            "n/I = 5//x",
            "n/I //",
            "n/I trailing",
            "n/I = 5 junk",
        ] {
            assert!(match_branch(line).is_none(), "accepted {:?}", line);
        }
    }
}
