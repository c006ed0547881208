//! URL slugs for catalog records.
//!
//! Titles are mostly Russian, so Cyrillic is transliterated to Latin before
//! the usual slugification: lowercase ASCII letters and digits separated by
//! single hyphens.

use std::collections::HashMap;

use lazy_static::lazy_static;

lazy_static! {
    static ref CYRILLIC_TO_LATIN: HashMap<char, &'static str> = [
        ('а', "a"),
        ('б', "b"),
        ('в', "v"),
        ('г', "g"),
        ('д', "d"),
        ('е', "e"),
        ('ё', "e"),
        ('ж', "zh"),
        ('з', "z"),
        ('и', "i"),
        ('й', "j"),
        ('к', "k"),
        ('л', "l"),
        ('м', "m"),
        ('н', "n"),
        ('о', "o"),
        ('п', "p"),
        ('р', "r"),
        ('с', "s"),
        ('т', "t"),
        ('у', "u"),
        ('ф', "f"),
        ('х', "h"),
        ('ц', "ts"),
        ('ч', "ch"),
        ('ш', "sh"),
        ('щ', "sch"),
        ('ъ', ""),
        ('ы', "y"),
        ('ь', ""),
        ('э', "e"),
        ('ю', "ju"),
        ('я', "ja"),
    ]
    .into_iter()
    .collect();
}

/// Transliterate Cyrillic characters of `input` into Latin.
///
/// Characters outside the Cyrillic table are passed through untouched.
pub fn transliterate(input: &str) -> String {
    let mut output = String::with_capacity(input.len());

    for ch in input.chars() {
        let lower = ch.to_lowercase().next().unwrap_or(ch);
        match CYRILLIC_TO_LATIN.get(&lower) {
            Some(latin) if ch.is_uppercase() => {
                let mut chars = latin.chars();
                if let Some(first) = chars.next() {
                    output.push(first.to_ascii_uppercase());
                    output.push_str(chars.as_str());
                }
            }
            Some(latin) => output.push_str(latin),
            None => output.push(ch),
        }
    }

    output
}

/// Build a URL-safe ASCII slug from a (possibly Cyrillic) title.
pub fn generate_slug(title: &str) -> String {
    let transliterated = transliterate(&title.to_lowercase());

    let mut slug = String::with_capacity(transliterated.len());
    let mut pending_separator = false;

    for ch in transliterated.chars().filter_map(fold_to_ascii) {
        if ch.is_ascii_alphanumeric() || ch == '_' {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(ch.to_ascii_lowercase());
        } else if ch.is_ascii_whitespace() || ch == '-' {
            pending_separator = true;
        }
    }

    slug.trim_matches(|c| c == '-' || c == '_').to_string()
}

fn fold_to_ascii(ch: char) -> Option<char> {
    if ch.is_ascii() {
        return Some(ch);
    }

    let folded = match ch {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'ç' => 'c',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ñ' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'ý' | 'ÿ' => 'y',
        _ if ch.is_whitespace() => ' ',
        _ => return None,
    };

    Some(folded)
}
