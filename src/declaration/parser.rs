//! Free-mode declaration parsing.
//!
//! Best-effort tokenizer that extracts a `(quantity, value)` pair from
//! free-form text: numerals and number words for the quantity, numerals and
//! value names (English and Italian, singular or plural) for the value.
//! Anything ambiguous is a rejection, never a guess. Progression legality is
//! checked separately by the state machine.

use crate::cards::CardValue;

/// Parse a free-form declaration like "3 kings", "tre re" or "4 7".
///
/// Returns `None` when no quantity/value pair can be extracted without
/// guessing. The first numeric or number-word token is the quantity; the
/// value is the first token after it naming a card value. Conflicting value
/// tokens reject the input.
#[must_use]
pub fn parse_declaration(text: &str) -> Option<(u8, CardValue)> {
    let tokens: Vec<String> = text
        .split_whitespace()
        .map(|t| {
            t.trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase()
        })
        .filter(|t| !t.is_empty())
        .collect();

    let (qty_idx, quantity) = tokens
        .iter()
        .enumerate()
        .find_map(|(i, t)| quantity_token(t).map(|q| (i, q)))?;

    if quantity == 0 {
        return None;
    }

    // The value must follow the quantity ("3 kings"); a bare name anywhere
    // else ("kings") has no count to attach to.
    let mut value: Option<CardValue> = None;
    for token in &tokens[qty_idx + 1..] {
        if let Some(v) = value_token(token) {
            match value {
                None => value = Some(v),
                // Two different value names is ambiguous.
                Some(prev) if prev != v => return None,
                Some(_) => {}
            }
        }
    }

    value.map(|v| (quantity, v))
}

/// Interpret a token as a claim quantity.
fn quantity_token(token: &str) -> Option<u8> {
    if let Ok(n) = token.parse::<u8>() {
        return Some(n);
    }
    let n = match token {
        "one" | "uno" | "una" => 1,
        "two" | "due" => 2,
        "three" | "tre" => 3,
        "four" | "quattro" => 4,
        "five" | "cinque" => 5,
        "six" | "sei" => 6,
        "seven" | "sette" => 7,
        "eight" | "otto" => 8,
        "nine" | "nove" => 9,
        "ten" | "dieci" => 10,
        _ => return None,
    };
    Some(n)
}

/// Interpret a token as a card value name or numeral.
fn value_token(token: &str) -> Option<CardValue> {
    if let Ok(n) = token.parse::<u8>() {
        return CardValue::ALL.iter().copied().find(|v| v.rank() == n);
    }
    let value = match token {
        "two" | "twos" | "due" => CardValue::Two,
        "three" | "threes" | "tre" => CardValue::Three,
        "four" | "fours" | "quattro" => CardValue::Four,
        "five" | "fives" | "cinque" => CardValue::Five,
        "six" | "sixes" | "sei" => CardValue::Six,
        "seven" | "sevens" | "sette" => CardValue::Seven,
        "eight" | "eights" | "otto" => CardValue::Eight,
        "nine" | "nines" | "nove" => CardValue::Nine,
        "ten" | "tens" | "dieci" => CardValue::Ten,
        "jack" | "jacks" | "fante" | "fanti" => CardValue::Jack,
        "queen" | "queens" | "donna" | "donne" | "regina" | "regine" => CardValue::Queen,
        "king" | "kings" | "re" => CardValue::King,
        "ace" | "aces" | "asso" | "assi" => CardValue::Ace,
        _ => return None,
    };
    Some(value)
}
