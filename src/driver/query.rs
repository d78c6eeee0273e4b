use serde::Serialize;

use crate::driver::element_type::ElementType;

// ============================================================================
// Structured element queries
// ============================================================================

/// Element attributes a text condition can inspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Attribute {
    Name,
    Label,
    Value,
}

impl Attribute {
    /// name / label / value: the full set used by text lookups.
    pub const ALL: [Attribute; 3] = [Attribute::Name, Attribute::Label, Attribute::Value];

    /// name / label: used when re-resolving a button by its caption.
    pub const CAPTION: [Attribute; 2] = [Attribute::Name, Attribute::Label];

    pub fn as_str(&self) -> &'static str {
        match self {
            Attribute::Name => "name",
            Attribute::Label => "label",
            Attribute::Value => "value",
        }
    }
}

/// Case-insensitive containment: matches when any needle is contained in any
/// of the listed attributes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextMatch {
    pub needles: Vec<String>,
    pub attributes: Vec<Attribute>,
}

impl TextMatch {
    pub fn contains(needle: &str, attributes: &[Attribute]) -> Self {
        TextMatch {
            needles: vec![needle.to_string()],
            attributes: attributes.to_vec(),
        }
    }

    pub fn any_of<S: AsRef<str>>(needles: &[S], attributes: &[Attribute]) -> Self {
        TextMatch {
            needles: needles.iter().map(|n| n.as_ref().to_string()).collect(),
            attributes: attributes.to_vec(),
        }
    }

    fn render(&self) -> String {
        self.needles
            .iter()
            .flat_map(|needle| {
                let escaped = escape_literal(needle);
                self.attributes
                    .iter()
                    .map(move |attr| format!("{} CONTAINS[c] '{}'", attr.as_str(), escaped))
            })
            .collect::<Vec<_>>()
            .join(" OR ")
    }
}

/// A driver-independent description of which elements to fetch.
///
/// The driver adapter renders it into one of the two query dialects; test
/// doubles can evaluate it directly.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ElementQuery {
    /// Restrict to one element kind; `None` means any kind
    pub element_type: Option<ElementType>,
    /// Only descendants of an element of this kind
    pub within: Option<ElementType>,
    pub text: Option<TextMatch>,
    /// 1-based position among the matches
    pub index: Option<usize>,
}

impl ElementQuery {
    pub fn of_type(element_type: ElementType) -> Self {
        ElementQuery {
            element_type: Some(element_type),
            ..Default::default()
        }
    }

    pub fn any() -> Self {
        ElementQuery::default()
    }

    pub fn within(mut self, ancestor: ElementType) -> Self {
        self.within = Some(ancestor);
        self
    }

    pub fn with_text(mut self, text: TextMatch) -> Self {
        self.text = Some(text);
        self
    }

    pub fn nth(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }
}

// ============================================================================
// Locators
// ============================================================================

/// The two query dialects exposed by the XCUITest driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Strategy {
    /// NSPredicate attribute query (`-ios predicate string`)
    Predicate,
    /// Hierarchical path expression (`-ios class chain`)
    ClassChain,
}

impl Strategy {
    /// W3C `using` value for this dialect.
    pub fn using(&self) -> &'static str {
        match self {
            Strategy::Predicate => "-ios predicate string",
            Strategy::ClassChain => "-ios class chain",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Locator {
    pub strategy: Strategy,
    pub query: ElementQuery,
}

impl Locator {
    pub fn predicate(query: ElementQuery) -> Self {
        Locator {
            strategy: Strategy::Predicate,
            query,
        }
    }

    pub fn class_chain(query: ElementQuery) -> Self {
        Locator {
            strategy: Strategy::ClassChain,
            query,
        }
    }

    /// Render the query in this locator's dialect.
    pub fn expression(&self) -> String {
        match self.strategy {
            Strategy::Predicate => render_predicate(&self.query),
            Strategy::ClassChain => render_class_chain(&self.query),
        }
    }
}

/// `type == 'T' AND (name CONTAINS[c] 'S' OR ...)`
///
/// The predicate dialect cannot express ancestry or position; those parts of
/// the query are ignored here.
fn render_predicate(query: &ElementQuery) -> String {
    let mut clauses = Vec::new();
    if let Some(t) = query.element_type {
        clauses.push(format!("type == '{}'", t.class_name()));
    }
    if let Some(text) = &query.text {
        clauses.push(format!("({})", text.render()));
    }
    if clauses.is_empty() {
        return "TRUEPREDICATE".to_string();
    }
    clauses.join(" AND ")
}

/// `**/Ancestor/**/Type[`predicate`][index]`
fn render_class_chain(query: &ElementQuery) -> String {
    let mut chain = String::new();
    if let Some(ancestor) = query.within {
        chain.push_str("**/");
        chain.push_str(ancestor.class_name());
        chain.push('/');
    }
    chain.push_str("**/");
    chain.push_str(query.element_type.map(|t| t.class_name()).unwrap_or("*"));
    if let Some(text) = &query.text {
        chain.push_str("[`");
        chain.push_str(&text.render());
        chain.push_str("`]");
    }
    if let Some(index) = query.index {
        chain.push_str(&format!("[{}]", index));
    }
    chain
}

/// Escape a user-supplied string for use inside a single-quoted literal.
pub fn escape_literal(raw: &str) -> String {
    raw.replace('\\', "\\\\").replace('\'', "\\'")
}
