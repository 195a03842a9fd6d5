//! Lexical tinnitus-type inference over user-authored turns

use crate::interview::profile::TinnitusType;

const BOTH_EARS: &str = "both ears";
const SYMMETRIC_CUES: [&str; 3] = ["same", "equal", "similar"];
const ASYMMETRIC_CUES: [&str; 3] = ["different", "worse in one", "not equal"];
const UNILATERAL_CUES: [&str; 3] = ["one ear", "left ear", "right ear"];

/// Infer a type from lower-cased user turns
///
/// Rules are tried in priority order over the whole corpus; the first rule
/// matched by any turn wins.
pub fn infer_type<S: AsRef<str>>(user_turns: &[S]) -> Option<TinnitusType> {
    let any = |pred: &dyn Fn(&str) -> bool| user_turns.iter().any(|t| pred(t.as_ref()));

    if any(&|t| t.contains(BOTH_EARS) && SYMMETRIC_CUES.iter().any(|c| t.contains(c))) {
        return Some(TinnitusType::BilateralSymmetric);
    }
    if any(&|t| t.contains(BOTH_EARS) && ASYMMETRIC_CUES.iter().any(|c| t.contains(c))) {
        return Some(TinnitusType::BilateralAsymmetric);
    }
    if any(&|t| UNILATERAL_CUES.iter().any(|c| t.contains(c))) {
        return Some(TinnitusType::Unilateral);
    }
    None
}
