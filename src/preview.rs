use crate::error::ValidationError;
use crate::tags::{TagField, Tags};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Specifier letters usable after `%` in a preview format.
pub static FORMAT_SPECS: Lazy<HashMap<char, TagField>> = Lazy::new(|| {
    HashMap::from([
        ('t', TagField::Title),
        ('a', TagField::Artist),
        ('l', TagField::Album),
        ('A', TagField::AlbumArtist),
        ('g', TagField::Genre),
        ('y', TagField::Date),
        ('n', TagField::Track),
        ('c', TagField::Comment),
    ])
});

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field(TagField),
}

/// Parsed preview format such as `%a - %l - %t`, used for the one-line
/// summary of the file under the cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreviewFormat {
    source: String,
    segments: Vec<Segment>,
}

impl PreviewFormat {
    pub fn parse(format: &str) -> Result<Self, ValidationError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = format.chars();

        while let Some(c) = chars.next() {
            if c != '%' {
                literal.push(c);
                continue;
            }

            match chars.next() {
                Some('%') => literal.push('%'),
                Some(spec) => {
                    let field = FORMAT_SPECS.get(&spec).copied().ok_or_else(|| {
                        ValidationError::new(format!(
                            "\"%{spec}\" is not a valid format specifier"
                        ))
                    })?;
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Field(field));
                }
                None => {
                    return Err(ValidationError::new(format!(
                        "\"{format}\" ends with an incomplete format specifier"
                    )))
                }
            }
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            source: format.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn fields(&self) -> impl Iterator<Item = TagField> + '_ {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Field(field) => Some(*field),
            Segment::Literal(_) => None,
        })
    }

    pub fn render(&self, tags: &Tags) -> String {
        self.segments
            .iter()
            .map(|segment| match segment {
                Segment::Literal(text) => text.clone(),
                Segment::Field(field) => tags.field(*field),
            })
            .collect()
    }
}
