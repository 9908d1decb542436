//! Symbol-to-entity transcoding.
//!
//! Every key in [`ENTITIES`] is a single `char`, so no key can overlap
//! another and replacement order never matters. Keep it that way when
//! extending the table.

use unicode_normalization::UnicodeNormalization;

use super::MarkupOptions;

/// Symbols replaced by [`transcode`], with their entity.
pub const ENTITIES: &[(char, &str)] = &[
    // typography
    ('©', "&copy;"),
    ('®', "&reg;"),
    ('™', "&trade;"),
    ('—', "&mdash;"),
    ('–', "&ndash;"),
    ('·', "&middot;"),
    ('…', "&hellip;"),
    ('“', "&ldquo;"),
    ('”', "&rdquo;"),
    ('‘', "&lsquo;"),
    ('’', "&rsquo;"),
    ('•', "&bull;"),
    ('°', "&deg;"),
    // currency
    ('£', "&pound;"),
    ('€', "&euro;"),
    ('₹', "&#8377;"),
    // math
    ('±', "&plusmn;"),
    ('×', "&times;"),
    ('÷', "&divide;"),
    ('≤', "&le;"),
    ('≥', "&ge;"),
    ('≠', "&ne;"),
    ('≈', "&asymp;"),
    ('≡', "&equiv;"),
    ('∼', "&sim;"),
    ('∑', "&sum;"),
    ('∏', "&prod;"),
    ('∫', "&int;"),
    ('√', "&radic;"),
    ('∞', "&infin;"),
    ('∂', "&part;"),
    ('∇', "&nabla;"),
    ('∈', "&isin;"),
    ('∉', "&notin;"),
    ('∅', "&#8709;"),
    ('∝', "&prop;"),
    ('∴', "&there4;"),
    ('∵', "&#8757;"),
    ('⇒', "&rArr;"),
    ('⇔', "&hArr;"),
    ('←', "&larr;"),
    ('→', "&rarr;"),
    ('↔', "&harr;"),
    ('↦', "&#8614;"),
    ('≅', "&cong;"),
    ('∗', "&lowast;"),
    // greek lowercase
    ('α', "&alpha;"),
    ('β', "&beta;"),
    ('γ', "&gamma;"),
    ('δ', "&delta;"),
    ('ε', "&epsilon;"),
    ('ζ', "&zeta;"),
    ('η', "&eta;"),
    ('θ', "&theta;"),
    ('ι', "&iota;"),
    ('κ', "&kappa;"),
    ('λ', "&lambda;"),
    ('μ', "&mu;"),
    ('ν', "&nu;"),
    ('ξ', "&xi;"),
    ('ο', "&omicron;"),
    ('π', "&pi;"),
    ('ρ', "&rho;"),
    ('σ', "&sigma;"),
    ('τ', "&tau;"),
    ('υ', "&upsilon;"),
    ('φ', "&phi;"),
    ('χ', "&chi;"),
    ('ψ', "&psi;"),
    ('ω', "&omega;"),
    ('ς', "&sigmaf;"),
    ('ϑ', "&#977;"),
    // greek uppercase
    ('Α', "&Alpha;"),
    ('Β', "&Beta;"),
    ('Γ', "&Gamma;"),
    ('Δ', "&Delta;"),
    ('Ε', "&Epsilon;"),
    ('Ζ', "&Zeta;"),
    ('Η', "&Eta;"),
    ('Θ', "&Theta;"),
    ('Ι', "&Iota;"),
    ('Κ', "&Kappa;"),
    ('Λ', "&Lambda;"),
    ('Μ', "&Mu;"),
    ('Ν', "&Nu;"),
    ('Ξ', "&Xi;"),
    ('Ο', "&Omicron;"),
    ('Π', "&Pi;"),
    ('Ρ', "&Rho;"),
    ('Σ', "&Sigma;"),
    ('Τ', "&Tau;"),
    ('Υ', "&Upsilon;"),
    ('Φ', "&Phi;"),
    ('Χ', "&Chi;"),
    ('Ψ', "&Psi;"),
    ('Ω', "&Omega;"),
    // latin accented
    ('á', "&aacute;"),
    ('à', "&agrave;"),
    ('â', "&acirc;"),
    ('ä', "&auml;"),
    ('ã', "&atilde;"),
    ('å', "&aring;"),
    ('Á', "&Aacute;"),
    ('À', "&Agrave;"),
    ('Â', "&Acirc;"),
    ('Ä', "&Auml;"),
    ('Ã', "&Atilde;"),
    ('Å', "&Aring;"),
    ('é', "&eacute;"),
    ('è', "&egrave;"),
    ('ê', "&ecirc;"),
    ('ë', "&euml;"),
    ('É', "&Eacute;"),
    ('È', "&Egrave;"),
    ('Ê', "&Ecirc;"),
    ('Ë', "&Euml;"),
    ('í', "&iacute;"),
    ('ì', "&igrave;"),
    ('î', "&icirc;"),
    ('ï', "&iuml;"),
    ('Í', "&Iacute;"),
    ('Ì', "&Igrave;"),
    ('Î', "&Icirc;"),
    ('Ï', "&Iuml;"),
    ('ó', "&oacute;"),
    ('ò', "&ograve;"),
    ('ô', "&ocirc;"),
    ('ö', "&ouml;"),
    ('õ', "&otilde;"),
    ('Ó', "&Oacute;"),
    ('Ò', "&Ograve;"),
    ('Ô', "&Ocirc;"),
    ('Ö', "&Ouml;"),
    ('Õ', "&Otilde;"),
    ('ú', "&uacute;"),
    ('ù', "&ugrave;"),
    ('û', "&ucirc;"),
    ('ü', "&uuml;"),
    ('Ú', "&Uacute;"),
    ('Ù', "&Ugrave;"),
    ('Û', "&Ucirc;"),
    ('Ü', "&Uuml;"),
    ('ñ', "&ntilde;"),
    ('Ñ', "&Ntilde;"),
    ('ç', "&ccedil;"),
    ('Ç', "&Ccedil;"),
    ('œ', "&oelig;"),
    ('Œ', "&OElig;"),
    ('æ', "&aelig;"),
    ('Æ', "&AElig;"),
    // quotes
    ('‹', "&lsaquo;"),
    ('›', "&rsaquo;"),
    ('«', "&laquo;"),
    ('»', "&raquo;"),
];

/// Entity for a symbol, if it is in the table.
pub fn entity_for(ch: char) -> Option<&'static str> {
    ENTITIES
        .iter()
        .find_map(|&(c, entity)| (c == ch).then_some(entity))
}

/// Replace every table symbol in `text` with its entity.
pub fn transcode(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match entity_for(ch) {
            Some(entity) => out.push_str(entity),
            None => out.push(ch),
        }
    }
    out
}

/// Decode table entities and numeric character references back to text.
///
/// Unknown or malformed references are left as they are.
pub fn decode(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        match tail.find(';').and_then(|end| {
            let reference = &tail[..=end];
            decode_reference(reference).map(|ch| (ch, end + 1))
        }) {
            Some((ch, len)) => {
                out.push(ch);
                rest = &tail[len..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_reference(reference: &str) -> Option<char> {
    let body = reference.strip_prefix('&')?.strip_suffix(';')?;
    if let Some(num) = body.strip_prefix('#') {
        let code = match num.strip_prefix('x').or_else(|| num.strip_prefix('X')) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse::<u32>().ok()?,
        };
        return char::from_u32(code);
    }
    ENTITIES
        .iter()
        .find_map(|&(ch, entity)| (entity == reference).then_some(ch))
}

/// Prepare region text for markup according to `options`.
pub fn prepare_text(text: &str, options: &MarkupOptions) -> String {
    let normalized: String = if options.normalize_unicode {
        text.nfc().collect()
    } else {
        text.to_string()
    };

    if options.auto_entities {
        transcode(&normalized)
    } else {
        normalized
    }
}
