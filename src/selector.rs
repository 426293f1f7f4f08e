use super::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SelectorAttrCondition {
    Exists { key: String },
    Eq { key: String, value: String },
}

/// One compound selector such as `li.list-item[data-type=document]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct SelectorStep {
    pub(crate) tag: Option<String>,
    pub(crate) universal: bool,
    pub(crate) id: Option<String>,
    pub(crate) classes: Vec<String>,
    pub(crate) attrs: Vec<SelectorAttrCondition>,
}

impl SelectorStep {
    pub(crate) fn id_only(&self) -> Option<&str> {
        let bare = !self.universal
            && self.tag.is_none()
            && self.classes.is_empty()
            && self.attrs.is_empty();
        bare.then_some(self.id.as_deref()).flatten()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SelectorCombinator {
    Descendant,
    Child,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SelectorPart {
    pub(crate) step: SelectorStep,
    // Relation to the part on the left; `None` for the first part.
    pub(crate) combinator: Option<SelectorCombinator>,
}

/// Parses a comma separated selector list, one chain per group.
///
/// Supported: type, `*`, `#id`, `.class`, `[attr]`, `[attr=value]` with a
/// bare or quoted value, descendant and `>` combinators. Anything else is
/// rejected with [`Error::UnsupportedSelector`].
pub(crate) fn parse_selector_groups(selector: &str) -> Result<Vec<Vec<SelectorPart>>> {
    let mut cursor = SelectorCursor { src: selector, i: 0 };
    let mut groups = Vec::new();
    loop {
        groups.push(cursor.chain()?);
        cursor.skip_ws();
        if cursor.eof() {
            return Ok(groups);
        }
        if !cursor.consume(b',') {
            return Err(cursor.unsupported());
        }
    }
}

struct SelectorCursor<'a> {
    src: &'a str,
    i: usize,
}

impl SelectorCursor<'_> {
    fn eof(&self) -> bool {
        self.i >= self.src.len()
    }

    fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.i).copied()
    }

    fn consume(&mut self, b: u8) -> bool {
        if self.peek() == Some(b) {
            self.i += 1;
            true
        } else {
            false
        }
    }

    /// Returns true when any whitespace was skipped.
    fn skip_ws(&mut self) -> bool {
        let start = self.i;
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.i += 1;
        }
        self.i > start
    }

    fn unsupported(&self) -> Error {
        Error::UnsupportedSelector(self.src.into())
    }

    fn chain(&mut self) -> Result<Vec<SelectorPart>> {
        self.skip_ws();
        let mut parts = vec![SelectorPart {
            step: self.compound()?,
            combinator: None,
        }];
        loop {
            let spaced = self.skip_ws();
            let combinator = match self.peek() {
                None | Some(b',') => return Ok(parts),
                Some(b'>') => {
                    self.i += 1;
                    self.skip_ws();
                    SelectorCombinator::Child
                }
                Some(_) if spaced => SelectorCombinator::Descendant,
                Some(_) => return Err(self.unsupported()),
            };
            parts.push(SelectorPart {
                step: self.compound()?,
                combinator: Some(combinator),
            });
        }
    }

    fn compound(&mut self) -> Result<SelectorStep> {
        let start = self.i;
        let mut step = SelectorStep::default();
        if self.consume(b'*') {
            step.universal = true;
        } else if let Some(tag) = self.ident() {
            step.tag = Some(tag.to_ascii_lowercase());
        }

        loop {
            if self.consume(b'#') {
                let id = self.ident().ok_or_else(|| self.unsupported())?;
                if step.id.replace(id).is_some() {
                    return Err(self.unsupported());
                }
            } else if self.consume(b'.') {
                let class_name = self.ident().ok_or_else(|| self.unsupported())?;
                step.classes.push(class_name);
            } else if self.consume(b'[') {
                let condition = self.attr_condition()?;
                step.attrs.push(condition);
            } else {
                break;
            }
        }

        if self.i == start {
            return Err(self.unsupported());
        }
        Ok(step)
    }

    fn ident(&mut self) -> Option<String> {
        let start = self.i;
        while self
            .peek()
            .is_some_and(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
        {
            self.i += 1;
        }
        (self.i > start).then(|| self.src[start..self.i].to_string())
    }

    // Called after the opening bracket.
    fn attr_condition(&mut self) -> Result<SelectorAttrCondition> {
        self.skip_ws();
        let key = self
            .ident()
            .ok_or_else(|| self.unsupported())?
            .to_ascii_lowercase();
        self.skip_ws();
        if self.consume(b']') {
            return Ok(SelectorAttrCondition::Exists { key });
        }
        if !self.consume(b'=') {
            return Err(self.unsupported());
        }

        self.skip_ws();
        let value = match self.peek() {
            Some(quote @ (b'"' | b'\'')) => {
                self.i += 1;
                let start = self.i;
                let len = self.src[start..]
                    .bytes()
                    .position(|b| b == quote)
                    .ok_or_else(|| self.unsupported())?;
                self.i = start + len + 1;
                self.src[start..start + len].to_string()
            }
            _ => self.ident().ok_or_else(|| self.unsupported())?,
        };
        self.skip_ws();
        if !self.consume(b']') {
            return Err(self.unsupported());
        }
        Ok(SelectorAttrCondition::Eq { key, value })
    }
}
