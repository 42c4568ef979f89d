//! Element view over a parsed vector source.
//!
//! Element and attribute names are matched ignoring ASCII case, the way
//! design tools are inconsistent about them. Attribute values arrive with
//! entities already decoded by the XML parser.

/// An element found in the source, with its attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Tag<'a> {
    /// Local element name as written.
    pub name: &'a str,
    /// Attributes in source order, by local name.
    pub attributes: Vec<(&'a str, &'a str)>,
}

impl<'a> Tag<'a> {
    pub fn from_node(node: roxmltree::Node<'a, '_>) -> Self {
        Self {
            name: node.tag_name().name(),
            attributes: node
                .attributes()
                .map(|attribute| (attribute.name(), attribute.value()))
                .collect(),
        }
    }

    /// Whether the element name matches, ignoring ASCII case.
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Look up an attribute by its local name, ignoring ASCII case.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.attributes
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| *value)
    }

    /// Look up a numeric attribute.
    ///
    /// Reads the leading number and ignores any trailing unit, so `"12px"`
    /// is 12. Returns `None` when the attribute is absent or not numeric.
    pub fn number(&self, name: &str) -> Option<f64> {
        self.attr(name).and_then(leading_number)
    }

    /// Whether this element's `id` equals `id`, ignoring ASCII case.
    pub fn has_id(&self, id: &str) -> bool {
        self.attr("id").is_some_and(|value| value.eq_ignore_ascii_case(id))
    }

    /// Whether a `url(#id)` reference attribute points at `id`.
    pub fn references(&self, attribute: &str, id: &str) -> bool {
        self.attr(attribute)
            .and_then(url_target)
            .is_some_and(|target| target.eq_ignore_ascii_case(id))
    }
}

/// Extract `id` from `url(#id)`, tolerating whitespace and quotes.
fn url_target(value: &str) -> Option<&str> {
    let value = value.trim();
    let prefix = value.get(..4)?;
    if !prefix.eq_ignore_ascii_case("url(") {
        return None;
    }
    let inner = value[4..].strip_suffix(')')?.trim();
    let inner = inner.trim_matches(|c| c == '"' || c == '\'');
    inner.strip_prefix('#')
}

/// Parse the leading number of an attribute value.
fn leading_number(value: &str) -> Option<f64> {
    let value = value.trim();
    let bytes = value.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let digits_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - digits_start;
    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        if frac_end > frac_start || digits > 0 {
            digits += frac_end - frac_start;
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    value[..end].parse().ok()
}
