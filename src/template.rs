//! Component C3: the message-template parser (spec.md §4.3).
//!
//! Only ever invoked on a string that has already been constant-folded
//! ([`crate::operation_utils::fold_string_constant`]) — a non-literal
//! template short-circuits before reaching here, per spec.md §4.3.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSegment {
    Literal(String),
    Placeholder {
        raw_name: String,
        format_spec: Option<String>,
        alignment: Option<i32>,
    },
}

impl TemplateSegment {
    pub fn placeholder_name(&self) -> Option<&str> {
        match self {
            TemplateSegment::Placeholder { raw_name, .. } => Some(raw_name),
            TemplateSegment::Literal(_) => None,
        }
    }
}

/// Parse a literal template string into literal/placeholder segments.
/// `{{` and `}}` are escapes for literal braces; `{name[:format][,alignment]}`
/// is a placeholder. Names are preserved verbatim, case-sensitive.
pub fn parse_template(template: &str) -> Vec<TemplateSegment> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let chars: Vec<char> = template.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '{' if chars.get(i + 1) == Some(&'{') => {
                literal.push('{');
                i += 2;
            }
            '}' if chars.get(i + 1) == Some(&'}') => {
                literal.push('}');
                i += 2;
            }
            '{' => {
                if let Some(close) = find_close_brace(&chars, i + 1) {
                    if !literal.is_empty() {
                        segments.push(TemplateSegment::Literal(std::mem::take(&mut literal)));
                    }
                    let body: String = chars[i + 1..close].iter().collect();
                    segments.push(parse_placeholder(&body));
                    i = close + 1;
                } else {
                    // Unmatched '{' — treat as a literal character rather
                    // than failing; spec.md §7 kind 3 keeps the raw string
                    // on malformed input.
                    literal.push('{');
                    i += 1;
                }
            }
            c => {
                literal.push(c);
                i += 1;
            }
        }
    }
    if !literal.is_empty() {
        segments.push(TemplateSegment::Literal(literal));
    }
    segments
}

fn find_close_brace(chars: &[char], from: usize) -> Option<usize> {
    chars[from..].iter().position(|&c| c == '}').map(|p| from + p)
}

fn parse_placeholder(body: &str) -> TemplateSegment {
    // Grammar is `name[:format][,alignment]` (spec.md §4.3): the name ends
    // at the first ':' or ',', and if a ':' starts the remainder, the
    // format itself may still be followed by a ',alignment' suffix.
    let split_at = body.find([':', ',']);
    let (raw_name, rest) = match split_at {
        Some(idx) => (body[..idx].trim().to_string(), Some(&body[idx..])),
        None => (body.trim().to_string(), None),
    };

    let mut format_spec = None;
    let mut alignment = None;
    if let Some(rest) = rest {
        if let Some(fmt_rest) = rest.strip_prefix(':') {
            match fmt_rest.find(',') {
                Some(cidx) => {
                    format_spec = Some(fmt_rest[..cidx].to_string());
                    alignment = fmt_rest[cidx + 1..].trim().parse::<i32>().ok();
                }
                None => format_spec = Some(fmt_rest.to_string()),
            }
        } else if let Some(align_rest) = rest.strip_prefix(',') {
            alignment = align_rest.trim().parse::<i32>().ok();
        }
    }

    TemplateSegment::Placeholder {
        raw_name,
        format_spec,
        alignment,
    }
}
