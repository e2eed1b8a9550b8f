// CSS selector to XPath translation
//
// Handles the selector subset page objects use in practice: type, universal,
// id, class and attribute selectors, the four combinators, selector groups
// and a handful of structural pseudo-classes. Anything else is reported as a
// `TranslateError`; `normalize` turns that into an expression matching
// nothing.
//
// Output is anchored with `/descendant-or-self::` so it composes with the
// other normalized fragments. A group renders as a single step testing each
// member with `self::`, so only groups of compound selectors translate.

use super::literal;
use std::fmt;

/// Why a selector could not be translated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateError {
    /// Character offset in the selector
    pub position: usize,
    pub message: String,
}

impl fmt::Display for TranslateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at offset {}", self.message, self.position)
    }
}

impl std::error::Error for TranslateError {}

type Result<T> = std::result::Result<T, TranslateError>;

/// Translate a CSS selector (or selector group) into an XPath expression.
pub fn to_xpath(selector: &str) -> Result<String> {
    let mut parser = Parser::new(selector);
    let mut selectors = parser.parse_group()?;

    if selectors.len() == 1 {
        let path = selectors.remove(0).path;
        return Ok(format!("/descendant-or-self::{path}"));
    }

    let mut tests = Vec::with_capacity(selectors.len());
    for selector in selectors {
        if !selector.compound {
            return Err(TranslateError {
                position: selector.start,
                message: "selector groups may only contain compound selectors".to_string(),
            });
        }
        tests.push(format!("self::{}", selector.path));
    }
    Ok(format!("/descendant-or-self::*[{}]", tests.join(" or ")))
}

/// One member of a selector group
#[derive(Debug)]
struct Selector {
    path: String,
    /// Offset of the selector in the input
    start: usize,
    /// No combinators: a single step
    compound: bool,
}

/// One compound selector: an element test plus its predicates
#[derive(Debug)]
struct Compound {
    element: String,
    conditions: Vec<String>,
}

impl Compound {
    /// `tag[cond][cond]`
    fn render(&self) -> String {
        let mut out = self.element.clone();
        for condition in &self.conditions {
            out.push('[');
            out.push_str(condition);
            out.push(']');
        }
        out
    }

    /// The same test as a boolean expression on the context node, for `:not()`
    fn as_condition(&self) -> String {
        let mut parts = Vec::with_capacity(self.conditions.len() + 1);
        if self.element != "*" {
            parts.push(format!("name() = {}", literal(&self.element)));
        }
        parts.extend(self.conditions.iter().map(|c| format!("({c})")));

        if parts.is_empty() {
            "true()".to_string()
        } else {
            parts.join(" and ")
        }
    }
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn new(selector: &str) -> Self {
        Self {
            chars: selector.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn error<T>(&self, message: impl Into<String>) -> Result<T> {
        Err(TranslateError {
            position: self.pos,
            message: message.into(),
        })
    }

    fn expect(&mut self, want: char) -> Result<()> {
        match self.peek() {
            Some(c) if c == want => {
                self.pos += 1;
                Ok(())
            }
            Some(c) => self.error(format!("expected '{want}', found '{c}'")),
            None => self.error(format!("expected '{want}', found end of selector")),
        }
    }

    /// Skips whitespace, returning whether any was consumed
    fn skip_ws(&mut self) -> bool {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.pos += 1;
        }
        self.pos > start
    }

    fn parse_group(&mut self) -> Result<Vec<Selector>> {
        let mut selectors = Vec::new();
        loop {
            self.skip_ws();
            selectors.push(self.parse_selector()?);
            self.skip_ws();
            match self.peek() {
                Some(',') => self.pos += 1,
                None => return Ok(selectors),
                Some(c) => return self.error(format!("unexpected '{c}'")),
            }
        }
    }

    fn parse_selector(&mut self) -> Result<Selector> {
        let start = self.pos;
        let mut path = self.parse_compound()?.render();
        let mut compound = true;

        loop {
            let had_ws = self.skip_ws();
            let step = match self.peek() {
                None | Some(',') => {
                    return Ok(Selector {
                        path,
                        start,
                        compound,
                    });
                }
                Some('>') => "/",
                Some('+') => "/following-sibling::*[1]/self::",
                Some('~') => "/following-sibling::",
                Some(_) if had_ws => {
                    compound = false;
                    path.push_str("/descendant-or-self::*/");
                    path.push_str(&self.parse_compound()?.render());
                    continue;
                }
                Some(c) => return self.error(format!("unexpected '{c}'")),
            };

            self.pos += 1;
            self.skip_ws();
            compound = false;
            path.push_str(step);
            path.push_str(&self.parse_compound()?.render());
        }
    }

    fn parse_compound(&mut self) -> Result<Compound> {
        let mut element = match self.peek() {
            Some('*') => {
                self.pos += 1;
                Some("*".to_string())
            }
            Some(c) if starts_ident(c, self.peek_at(1)) => Some(self.ident()?.to_ascii_lowercase()),
            _ => None,
        };

        let mut conditions = Vec::new();
        let mut matched = element.is_some();
        loop {
            match self.peek() {
                Some('#') => {
                    self.pos += 1;
                    let id = self.ident()?;
                    conditions.push(format!("@id = {}", literal(&id)));
                }
                Some('.') => {
                    self.pos += 1;
                    let class = self.ident()?;
                    conditions.push(format!(
                        "contains(concat(\" \", normalize-space(@class), \" \"), {})",
                        literal(&format!(" {class} "))
                    ));
                }
                Some('[') => {
                    self.pos += 1;
                    conditions.push(self.attribute()?);
                }
                Some(':') => {
                    self.pos += 1;
                    let tag = element.get_or_insert_with(|| "*".to_string()).clone();
                    conditions.push(self.pseudo(&tag)?);
                }
                _ => break,
            }
            matched = true;
        }

        if !matched {
            return match self.peek() {
                Some(c) => self.error(format!("expected a selector, found '{c}'")),
                None => self.error("expected a selector, found end of selector"),
            };
        }

        Ok(Compound {
            element: element.unwrap_or_else(|| "*".to_string()),
            conditions,
        })
    }

    fn attribute(&mut self) -> Result<String> {
        self.skip_ws();
        let name = self.ident()?;
        let attr = format!("@{name}");
        self.skip_ws();

        let op = match (self.peek(), self.peek_at(1)) {
            (Some(']'), _) => {
                self.pos += 1;
                return Ok(attr);
            }
            (Some('='), _) => {
                self.pos += 1;
                "="
            }
            (Some(c @ ('~' | '|' | '^' | '$' | '*')), Some('=')) => {
                self.pos += 2;
                match c {
                    '~' => "~=",
                    '|' => "|=",
                    '^' => "^=",
                    '$' => "$=",
                    _ => "*=",
                }
            }
            (Some(c), _) => return self.error(format!("unexpected '{c}' in attribute selector")),
            (None, _) => return self.error("unterminated attribute selector"),
        };

        self.skip_ws();
        let value = match self.peek() {
            Some(quote @ ('"' | '\'')) => self.string(quote)?,
            _ => self.ident()?,
        };
        self.skip_ws();
        self.expect(']')?;

        let condition = match op {
            "=" => format!("{attr} = {}", literal(&value)),
            "~=" if value.is_empty() || value.contains(char::is_whitespace) => "false()".to_string(),
            "~=" => format!(
                "{attr} and contains(concat(\" \", normalize-space({attr}), \" \"), {})",
                literal(&format!(" {value} "))
            ),
            "|=" => format!(
                "{attr} and ({attr} = {} or starts-with({attr}, {}))",
                literal(&value),
                literal(&format!("{value}-"))
            ),
            _ if value.is_empty() => "false()".to_string(),
            "^=" => format!("{attr} and starts-with({attr}, {})", literal(&value)),
            "$=" => format!(
                "{attr} and substring({attr}, string-length({attr}) - {}) = {}",
                value.chars().count() - 1,
                literal(&value)
            ),
            _ => format!("{attr} and contains({attr}, {})", literal(&value)),
        };
        Ok(condition)
    }

    fn pseudo(&mut self, element: &str) -> Result<String> {
        if self.peek() == Some(':') {
            return self.error("pseudo-elements cannot be translated");
        }
        let name = self.ident()?.to_ascii_lowercase();

        if self.peek() == Some('(') {
            self.pos += 1;
            self.skip_ws();
            let condition = match name.as_str() {
                "nth-child" => {
                    let start = self.pos;
                    while !matches!(self.peek(), Some(')') | None) {
                        self.pos += 1;
                    }
                    let argument: String = self.chars[start..self.pos].iter().collect();
                    match parse_nth(&argument) {
                        Some((a, b)) => nth_child(a, b),
                        None => return self.error(format!("invalid :nth-child argument '{argument}'")),
                    }
                }
                "not" => {
                    let inner = self.parse_compound()?;
                    format!("not({})", inner.as_condition())
                }
                other => return self.error(format!("unsupported pseudo-class ':{other}()'")),
            };
            self.skip_ws();
            self.expect(')')?;
            return Ok(condition);
        }

        let condition = match name.as_str() {
            "first-child" => "count(preceding-sibling::*) = 0".to_string(),
            "last-child" => "count(following-sibling::*) = 0".to_string(),
            "only-child" => {
                "count(preceding-sibling::*) = 0 and count(following-sibling::*) = 0".to_string()
            }
            "first-of-type" | "last-of-type" if element == "*" => {
                return self.error(format!(":{name} needs an element name"));
            }
            "first-of-type" => format!("count(preceding-sibling::{element}) = 0"),
            "last-of-type" => format!("count(following-sibling::{element}) = 0"),
            "empty" => "not(*) and not(string-length())".to_string(),
            "checked" => concat!(
                "(@selected and name(.) = \"option\") or ",
                "(@checked and (name(.) = \"input\" or name(.) = \"command\") ",
                "and (@type = \"checkbox\" or @type = \"radio\"))"
            )
            .to_string(),
            "disabled" => "@disabled".to_string(),
            "enabled" => "not(@disabled)".to_string(),
            other => return self.error(format!("unsupported pseudo-class ':{other}'")),
        };
        Ok(condition)
    }

    fn ident(&mut self) -> Result<String> {
        match self.peek() {
            Some(c) if starts_ident(c, self.peek_at(1)) => {}
            Some(c) => return self.error(format!("expected an identifier, found '{c}'")),
            None => return self.error("expected an identifier, found end of selector"),
        }

        let mut out = String::new();
        while let Some(c) = self.peek() {
            if c == '\\' {
                self.pos += 1;
                out.push(self.escape()?);
            } else if c.is_alphanumeric() || c == '-' || c == '_' || !c.is_ascii() {
                out.push(c);
                self.pos += 1;
            } else {
                break;
            }
        }
        Ok(out)
    }

    /// Character after a backslash: up to six hex digits, or one literal char
    fn escape(&mut self) -> Result<char> {
        let start = self.pos;
        while self.pos - start < 6 && matches!(self.peek(), Some(c) if c.is_ascii_hexdigit()) {
            self.pos += 1;
        }

        if self.pos == start {
            return match self.peek() {
                Some(c) => {
                    self.pos += 1;
                    Ok(c)
                }
                None => self.error("dangling escape"),
            };
        }

        let hex: String = self.chars[start..self.pos].iter().collect();
        if self.peek() == Some(' ') {
            self.pos += 1;
        }
        match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
            Some(c) => Ok(c),
            None => self.error(format!("invalid escape '\\{hex}'")),
        }
    }

    fn string(&mut self, quote: char) -> Result<String> {
        self.pos += 1;
        let mut out = String::new();
        loop {
            match self.peek() {
                Some(c) if c == quote => {
                    self.pos += 1;
                    return Ok(out);
                }
                Some('\\') => {
                    self.pos += 1;
                    out.push(self.escape()?);
                }
                Some(c) => {
                    out.push(c);
                    self.pos += 1;
                }
                None => return self.error("unterminated string"),
            }
        }
    }
}

fn starts_ident(c: char, next: Option<char>) -> bool {
    match c {
        '-' => matches!(next, Some(n) if n.is_alphabetic() || n == '_' || n == '-' || !n.is_ascii()),
        '\\' => next.is_some(),
        _ => c.is_alphabetic() || c == '_' || !c.is_ascii(),
    }
}

/// Parse the `an+b` micro-syntax (plus `odd` / `even`). Coefficients are
/// limited to the `i32` range.
fn parse_nth(argument: &str) -> Option<(i64, i64)> {
    let text: String = argument
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_lowercase();

    match text.as_str() {
        "odd" => return Some((2, 1)),
        "even" => return Some((2, 0)),
        "" => return None,
        _ => {}
    }

    let Some(n_at) = text.find('n') else {
        return text.parse::<i32>().ok().map(|b| (0, i64::from(b)));
    };

    let a = match &text[..n_at] {
        "" | "+" => 1,
        "-" => -1,
        digits => digits.parse::<i32>().ok()?,
    };
    let b = match &text[n_at + 1..] {
        "" => 0,
        rest if rest.starts_with('+') || rest.starts_with('-') => rest.parse::<i32>().ok()?,
        _ => return None,
    };
    Some((i64::from(a), i64::from(b)))
}

fn nth_child(a: i64, b: i64) -> String {
    if a == 0 {
        return format!("count(preceding-sibling::*) + 1 = {b}");
    }

    let position = match b {
        0 => "count(preceding-sibling::*) + 1".to_string(),
        b if b > 0 => format!("count(preceding-sibling::*) + 1 - {b}"),
        b => format!("count(preceding-sibling::*) + 1 + {}", b.unsigned_abs()),
    };
    format!("({position}) mod {a} = 0 and ({position}) div {a} >= 0")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_id_and_class() {
        assert_eq!(to_xpath("div").unwrap(), "/descendant-or-self::div");
        assert_eq!(to_xpath("*").unwrap(), "/descendant-or-self::*");
        assert_eq!(
            to_xpath("#main").unwrap(),
            r#"/descendant-or-self::*[@id = "main"]"#
        );
        assert_eq!(
            to_xpath("a.nav.active").unwrap(),
            concat!(
                r#"/descendant-or-self::a"#,
                r#"[contains(concat(" ", normalize-space(@class), " "), " nav ")]"#,
                r#"[contains(concat(" ", normalize-space(@class), " "), " active ")]"#
            )
        );
    }

    #[test]
    fn test_attribute_operators() {
        assert_eq!(
            to_xpath("[data-qa-id]").unwrap(),
            "/descendant-or-self::*[@data-qa-id]"
        );
        assert_eq!(
            to_xpath("input[type=\"checkbox\"]").unwrap(),
            r#"/descendant-or-self::input[@type = "checkbox"]"#
        );
        assert_eq!(
            to_xpath("[data-qa-id^=form-]").unwrap(),
            r#"/descendant-or-self::*[@data-qa-id and starts-with(@data-qa-id, "form-")]"#
        );
        assert_eq!(
            to_xpath("[href$='.pdf']").unwrap(),
            r#"/descendant-or-self::*[@href and substring(@href, string-length(@href) - 3) = ".pdf"]"#
        );
        assert_eq!(
            to_xpath("[title*=\"\"]").unwrap(),
            "/descendant-or-self::*[false()]"
        );
        assert_eq!(
            to_xpath("[lang|=en]").unwrap(),
            r#"/descendant-or-self::*[@lang and (@lang = "en" or starts-with(@lang, "en-"))]"#
        );
    }

    #[test]
    fn test_combinators() {
        assert_eq!(
            to_xpath("form input").unwrap(),
            "/descendant-or-self::form/descendant-or-self::*/input"
        );
        assert_eq!(
            to_xpath("ul > li").unwrap(),
            "/descendant-or-self::ul/li"
        );
        assert_eq!(
            to_xpath("label + input").unwrap(),
            "/descendant-or-self::label/following-sibling::*[1]/self::input"
        );
        assert_eq!(
            to_xpath("h1~p").unwrap(),
            "/descendant-or-self::h1/following-sibling::p"
        );
    }

    #[test]
    fn test_group_is_one_step() {
        assert_eq!(
            to_xpath("h1, h2").unwrap(),
            "/descendant-or-self::*[self::h1 or self::h2]"
        );
        assert_eq!(
            to_xpath("button.save , a[href]").unwrap(),
            concat!(
                r#"/descendant-or-self::*[self::button"#,
                r#"[contains(concat(" ", normalize-space(@class), " "), " save ")]"#,
                r#" or self::a[@href]]"#
            )
        );
        assert!(to_xpath("h1, nav a").is_err());
        assert!(to_xpath("ul > li, p").is_err());
    }

    #[test]
    fn test_pseudo_classes() {
        assert_eq!(
            to_xpath("li:first-child").unwrap(),
            "/descendant-or-self::li[count(preceding-sibling::*) = 0]"
        );
        assert_eq!(
            to_xpath("tr:nth-child(3)").unwrap(),
            "/descendant-or-self::tr[count(preceding-sibling::*) + 1 = 3]"
        );
        assert_eq!(
            to_xpath("tr:nth-child(odd)").unwrap(),
            "/descendant-or-self::tr[(count(preceding-sibling::*) + 1 - 1) mod 2 = 0 and (count(preceding-sibling::*) + 1 - 1) div 2 >= 0]"
        );
        assert_eq!(
            to_xpath("button:not(.hidden)").unwrap(),
            r#"/descendant-or-self::button[not((contains(concat(" ", normalize-space(@class), " "), " hidden ")))]"#
        );
        assert_eq!(
            to_xpath(":disabled").unwrap(),
            "/descendant-or-self::*[@disabled]"
        );
    }

    #[test]
    fn test_escapes() {
        assert_eq!(
            to_xpath("#a\\:b").unwrap(),
            r#"/descendant-or-self::*[@id = "a:b"]"#
        );
        assert_eq!(
            to_xpath("#\\31 23").unwrap(),
            r#"/descendant-or-self::*[@id = "123"]"#
        );
    }

    #[test]
    fn test_rejected_selectors() {
        for selector in [
            "",
            "   ",
            "###invalid",
            "div >",
            "> div",
            "div,",
            "p::before",
            "a:hover",
            "[unterminated",
            "*:first-of-type",
            "li:nth-child(foo)",
            "li:nth-child(-9223372036854775808)",
            "li:nth-child(n-9223372036854775808)",
            "li:nth-child(99999999999n)",
            "svg|rect",
        ] {
            assert!(to_xpath(selector).is_err(), "selector {selector:?} should fail");
        }
    }

    #[test]
    fn test_parse_nth() {
        assert_eq!(parse_nth("2n+1"), Some((2, 1)));
        assert_eq!(parse_nth("-n + 3"), Some((-1, 3)));
        assert_eq!(parse_nth("n"), Some((1, 0)));
        assert_eq!(parse_nth("even"), Some((2, 0)));
        assert_eq!(parse_nth("5"), Some((0, 5)));
        assert_eq!(parse_nth("2n1"), None);
        assert_eq!(parse_nth("-2147483648"), Some((0, -2147483648)));
        assert_eq!(parse_nth("n-2147483649"), None);
    }
}
