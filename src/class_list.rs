use kuchikiki::ElementData;

/// The `class` attribute of an element, seen as a set of tokens.
///
/// Mutations re-serialize the attribute with single spaces, like the DOM's
/// `classList` does.
pub struct ClassList<'a> {
    element: &'a ElementData,
}

impl<'a> ClassList<'a> {
    pub fn new(element: &'a ElementData) -> Self {
        Self { element }
    }

    /// The distinct tokens, in order of first appearance.
    pub fn tokens(&self) -> Vec<String> {
        let attributes = self.element.attributes.borrow();
        let Some(value) = attributes.get("class") else {
            return Vec::new();
        };

        let mut tokens: Vec<String> = Vec::new();
        for token in value.split_ascii_whitespace() {
            if !tokens.iter().any(|seen| seen == token) {
                tokens.push(token.to_owned());
            }
        }
        tokens
    }

    pub fn contains(&self, class: &str) -> bool {
        self.tokens().iter().any(|token| token == class)
    }

    /// Returns `false` when the class was already present. The attribute is
    /// rewritten either way.
    pub fn add(&self, class: &str) -> bool {
        let mut tokens = self.tokens();
        let added = !tokens.iter().any(|token| token == class);
        if added {
            tokens.push(class.to_owned());
        }
        self.set(tokens);
        added
    }

    /// Returns `false` when the class was not present. The attribute is
    /// rewritten either way.
    pub fn remove(&self, class: &str) -> bool {
        let mut tokens = self.tokens();
        let before = tokens.len();
        tokens.retain(|token| token != class);
        let removed = tokens.len() != before;
        self.set(tokens);
        removed
    }

    fn set(&self, tokens: Vec<String>) {
        let mut attributes = self.element.attributes.borrow_mut();
        if tokens.is_empty() && !attributes.contains("class") {
            return;
        }
        attributes.insert("class", tokens.join(" "));
    }
}
