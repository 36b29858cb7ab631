//! CSS to XPath conversion.
//!
//! WebDriver has no CSS `:contains()` pseudo-class, so selectors using it are
//! rewritten as XPath before they reach the driver. Only the CSS subset
//! needed alongside `:contains()` is supported:
//!
//! | CSS | XPath |
//! |-----|-------|
//! | `tag`, `*` | `tag`, `*` |
//! | `#id` | `[@id = 'id']` |
//! | `.cls` | class token test |
//! | `[a]`, `[a=v]`, `[a~=v]`, `[a\|=v]`, `[a^=v]`, `[a$=v]`, `[a*=v]` | attribute tests |
//! | `:contains(text)` | `[contains(., 'text')]` |
//! | `:first-child`, `:last-child`, `:nth-child(n)` | sibling counts |
//! | `A B`, `A > B`, `A + B`, `A ~ B` | `//`, `/`, adjacent and general sibling axes |
//! | `A, B` | `A \| B` |
//!
//! # Example
//!
//! ```ignore
//! let xpath = css_to_xpath("button.primary:contains('Save')")?;
//! assert_eq!(
//!     xpath,
//!     "//button[@class and contains(concat(' ', normalize-space(@class), ' '), ' primary ')][contains(., 'Save')]"
//! );
//! ```

use crate::error::{Error, Result};

// ============================================================================
// Public API
// ============================================================================

/// Converts a CSS selector (group) into an equivalent XPath expression.
///
/// # Errors
///
/// Returns [`Error::InvalidSelector`] when the selector is empty, malformed,
/// or uses a construct outside the supported subset.
pub fn css_to_xpath(css: &str) -> Result<String> {
    let mut parser = Parser::new(css);
    let mut groups = Vec::new();

    loop {
        groups.push(parser.selector()?);
        parser.skip_ws();
        match parser.peek() {
            Some(',') => {
                parser.bump();
            }
            None => break,
            Some(c) => return Err(parser.error(format!("unexpected character '{c}'"))),
        }
    }

    Ok(groups.join(" | "))
}

// ============================================================================
// Parser
// ============================================================================

/// How a compound selector relates to the one before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    Descendant,
    Child,
    Adjacent,
    Sibling,
}

struct Parser<'a> {
    source: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.chars().collect(),
            pos: 0,
        }
    }

    fn error(&self, message: impl Into<String>) -> Error {
        Error::invalid_selector(self.source, message)
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn skip_ws(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
        self.pos > start
    }

    /// Parses one complex selector (compounds joined by combinators).
    fn selector(&mut self) -> Result<String> {
        self.skip_ws();
        let mut xpath = String::from("//");
        xpath.push_str(&self.compound()?);

        loop {
            let had_ws = self.skip_ws();
            let combinator = match self.peek() {
                Some('>') => Combinator::Child,
                Some('+') => Combinator::Adjacent,
                Some('~') => Combinator::Sibling,
                Some(',') | None => break,
                Some(_) if had_ws => Combinator::Descendant,
                Some(c) => return Err(self.error(format!("unexpected character '{c}'"))),
            };
            if combinator != Combinator::Descendant {
                self.bump();
                self.skip_ws();
            }

            let (tag, predicates) = self.compound_parts()?;
            match combinator {
                Combinator::Descendant => {
                    xpath.push_str("//");
                    xpath.push_str(&tag);
                }
                Combinator::Child => {
                    xpath.push('/');
                    xpath.push_str(&tag);
                }
                Combinator::Adjacent => {
                    xpath.push_str("/following-sibling::*[1]/self::");
                    xpath.push_str(&tag);
                }
                Combinator::Sibling => {
                    xpath.push_str("/following-sibling::");
                    xpath.push_str(&tag);
                }
            }
            push_predicates(&mut xpath, &predicates);
        }

        Ok(xpath)
    }

    fn compound(&mut self) -> Result<String> {
        let (tag, predicates) = self.compound_parts()?;
        let mut out = tag;
        push_predicates(&mut out, &predicates);
        Ok(out)
    }

    /// Parses a compound selector into its element test and predicates.
    fn compound_parts(&mut self) -> Result<(String, Vec<String>)> {
        let explicit = self.eat('*');
        let tag = if !explicit && self.peek().is_some_and(is_ident_char) {
            self.ident()?
        } else {
            "*".to_string()
        };

        let mut predicates = Vec::new();
        loop {
            match self.peek() {
                Some('#') => {
                    self.bump();
                    let id = self.ident()?;
                    predicates.push(format!("@id = {}", literal(&id)));
                }
                Some('.') => {
                    self.bump();
                    let class = self.ident()?;
                    predicates.push(token_test("class", &class));
                }
                Some('[') => {
                    self.bump();
                    predicates.push(self.attribute()?);
                }
                Some(':') => {
                    self.bump();
                    predicates.push(self.pseudo()?);
                }
                _ => break,
            }
        }

        if tag == "*" && predicates.is_empty() && !explicit {
            return Err(self.error("expected a selector"));
        }

        Ok((tag, predicates))
    }

    fn ident(&mut self) -> Result<String> {
        let mut ident = String::new();
        while let Some(c) = self.peek() {
            if c == '\\' {
                self.bump();
                match self.bump() {
                    Some(escaped) => ident.push(escaped),
                    None => return Err(self.error("dangling escape")),
                }
            } else if is_ident_char(c) {
                ident.push(c);
                self.bump();
            } else {
                break;
            }
        }
        if ident.is_empty() {
            return Err(self.error("expected an identifier"));
        }
        Ok(ident)
    }

    fn string_or_ident(&mut self) -> Result<String> {
        match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.bump();
                let mut value = String::new();
                loop {
                    match self.bump() {
                        Some(c) if c == quote => return Ok(value),
                        Some('\\') => match self.bump() {
                            Some(escaped) => value.push(escaped),
                            None => return Err(self.error("unterminated string")),
                        },
                        Some(c) => value.push(c),
                        None => return Err(self.error("unterminated string")),
                    }
                }
            }
            _ => self.ident(),
        }
    }

    fn attribute(&mut self) -> Result<String> {
        self.skip_ws();
        let name = self.ident()?;
        self.skip_ws();

        if self.eat(']') {
            return Ok(format!("@{name}"));
        }

        let op = match self.bump() {
            Some('=') => "=".to_string(),
            Some(c @ ('~' | '|' | '^' | '$' | '*')) if self.eat('=') => format!("{c}="),
            _ => return Err(self.error(format!("bad operator in attribute [{name}]"))),
        };
        self.skip_ws();
        let value = self.string_or_ident()?;
        self.skip_ws();
        if !self.eat(']') {
            return Err(self.error("expected ']'"));
        }

        let attr = format!("@{name}");
        let lit = literal(&value);
        let predicate = match op.as_str() {
            "=" => format!("{attr} = {lit}"),
            "~=" => token_test(&name, &value),
            "|=" => format!(
                "{attr} and ({attr} = {lit} or starts-with({attr}, {}))",
                literal(&format!("{value}-"))
            ),
            "^=" => format!("{attr} and starts-with({attr}, {lit})"),
            "$=" => format!(
                "{attr} and substring({attr}, string-length({attr})-{}) = {lit}",
                value.chars().count().saturating_sub(1)
            ),
            _ => format!("{attr} and contains({attr}, {lit})"),
        };
        Ok(predicate)
    }

    fn pseudo(&mut self) -> Result<String> {
        let name = self.ident()?.to_ascii_lowercase();
        match name.as_str() {
            "contains" => {
                let text = self.pseudo_argument()?;
                Ok(format!("contains(., {})", literal(&text)))
            }
            "first-child" => Ok("count(preceding-sibling::*) = 0".to_string()),
            "last-child" => Ok("count(following-sibling::*) = 0".to_string()),
            "nth-child" => {
                let arg = self.pseudo_argument()?;
                let n: usize = arg
                    .trim()
                    .parse()
                    .map_err(|_| self.error(format!("unsupported :nth-child({arg})")))?;
                if n == 0 {
                    return Err(self.error(":nth-child() is 1-based"));
                }
                Ok(format!("count(preceding-sibling::*) = {}", n - 1))
            }
            other => Err(self.error(format!("unsupported pseudo-class :{other}"))),
        }
    }

    /// Reads a parenthesized argument, quoted or raw up to `)`.
    fn pseudo_argument(&mut self) -> Result<String> {
        if !self.eat('(') {
            return Err(self.error("expected '('"));
        }
        self.skip_ws();
        let value = if matches!(self.peek(), Some('"' | '\'')) {
            let quoted = self.string_or_ident()?;
            self.skip_ws();
            quoted
        } else {
            let mut raw = String::new();
            while let Some(c) = self.peek() {
                if c == ')' {
                    break;
                }
                raw.push(c);
                self.bump();
            }
            raw.trim_end().to_string()
        };
        if !self.eat(')') {
            return Err(self.error("expected ')'"));
        }
        Ok(value)
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_' || !c.is_ascii()
}

fn push_predicates(out: &mut String, predicates: &[String]) {
    for predicate in predicates {
        out.push('[');
        out.push_str(predicate);
        out.push(']');
    }
}

/// Whitespace-separated token membership, as CSS `.class` and `~=` use.
fn token_test(attribute: &str, token: &str) -> String {
    format!(
        "@{attribute} and contains(concat(' ', normalize-space(@{attribute}), ' '), {})",
        literal(&format!(" {token} "))
    )
}

/// Quotes a string as an XPath literal.
///
/// XPath 1.0 has no escapes, so text holding both quote kinds is built
/// with `concat()`.
pub(crate) fn literal(value: &str) -> String {
    if !value.contains('\'') {
        return format!("'{value}'");
    }
    if !value.contains('"') {
        return format!("\"{value}\"");
    }
    let parts: Vec<String> = value
        .split('\'')
        .map(|part| format!("'{part}'"))
        .collect();
    format!("concat({})", parts.join(", \"'\", "))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_with_tag() {
        assert_eq!(
            css_to_xpath("button:contains(\"Go\")").unwrap(),
            "//button[contains(., 'Go')]"
        );
    }

    #[test]
    fn test_contains_unquoted_argument() {
        assert_eq!(
            css_to_xpath("a:contains(Sign in)").unwrap(),
            "//a[contains(., 'Sign in')]"
        );
    }

    #[test]
    fn test_bare_contains_matches_any_element() {
        assert_eq!(
            css_to_xpath(":contains('Total')").unwrap(),
            "//*[contains(., 'Total')]"
        );
    }

    #[test]
    fn test_id_class_and_child_combinator() {
        assert_eq!(
            css_to_xpath("div#main > span.note:contains(Hi)").unwrap(),
            "//div[@id = 'main']/span[@class and contains(concat(' ', normalize-space(@class), ' '), ' note ')][contains(., 'Hi')]"
        );
    }

    #[test]
    fn test_descendant_and_attribute_operators() {
        assert_eq!(
            css_to_xpath("form input[name='q']").unwrap(),
            "//form//input[@name = 'q']"
        );
        assert_eq!(
            css_to_xpath("a[href^='/docs']").unwrap(),
            "//a[@href and starts-with(@href, '/docs')]"
        );
        assert_eq!(
            css_to_xpath("img[src$=\".png\"]").unwrap(),
            "//img[@src and substring(@src, string-length(@src)-3) = '.png']"
        );
        assert_eq!(
            css_to_xpath("p[title*=warn]").unwrap(),
            "//p[@title and contains(@title, 'warn')]"
        );
        assert_eq!(css_to_xpath("td[data-id]").unwrap(), "//td[@data-id]");
    }

    #[test]
    fn test_sibling_combinators() {
        assert_eq!(
            css_to_xpath("h2 + p").unwrap(),
            "//h2/following-sibling::*[1]/self::p"
        );
        assert_eq!(css_to_xpath("h2 ~ p").unwrap(), "//h2/following-sibling::p");
    }

    #[test]
    fn test_structural_pseudo_classes() {
        assert_eq!(
            css_to_xpath("li:nth-child(3)").unwrap(),
            "//li[count(preceding-sibling::*) = 2]"
        );
        assert_eq!(
            css_to_xpath("li:first-child").unwrap(),
            "//li[count(preceding-sibling::*) = 0]"
        );
    }

    #[test]
    fn test_selector_group() {
        assert_eq!(
            css_to_xpath("h1:contains(A), h2:contains(B)").unwrap(),
            "//h1[contains(., 'A')] | //h2[contains(., 'B')]"
        );
    }

    #[test]
    fn test_literal_quoting() {
        assert_eq!(literal("plain"), "'plain'");
        assert_eq!(literal("it's"), "\"it's\"");
        assert_eq!(
            literal("say \"it's\""),
            "concat('say \"it', \"'\", 's\"')"
        );
    }

    #[test]
    fn test_invalid_selectors() {
        assert!(css_to_xpath("").is_err());
        assert!(css_to_xpath("div[").is_err());
        assert!(css_to_xpath("a:hover").is_err());
        assert!(css_to_xpath("p:contains(x").is_err());
        assert!(css_to_xpath("li:nth-child(odd)").is_err());
    }
}
