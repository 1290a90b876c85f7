//! Rendering of roll traces into the canonical chat-facing text.
//!
//! Every mechanic produces the same overall shape:
//!
//! ```text
//! 🎲 {base} [{faces}] + {modifier} + {modifier}
//! 🧮 Total: {total}
//! ```
//!
//! with mechanic-specific lines in between (explosions, successes, Hope and
//! Fear). Output depends only on the arguments.

use crate::outcome::{Comparison, Outcome};

/// Join trace lines and, when given, append the total line.
pub fn assemble(parts: &[String], total: Option<i64>) -> String {
    let mut lines: Vec<String> = parts.to_vec();
    if let Some(total) = total {
        lines.push(total_line(total));
    }
    lines.join("\n")
}

/// `🎲 {base} [{faces}]` followed by ` + fragment` for each modifier.
pub fn roll_line(base: &str, faces: &[String], fragments: &[String]) -> String {
    format!("🎲 {base} [{}]{}", faces.join(", "), modifier_suffix(fragments))
}

/// Exploding dice: one bracketed chain per die, e.g. `🎲 2d6 [6, 6, 2] [3]`.
pub fn exploding_line(base: &str, chains: &[Vec<i64>], fragments: &[String]) -> String {
    let chains: Vec<String> = chains
        .iter()
        .map(|chain| {
            let faces: Vec<String> = chain.iter().map(i64::to_string).collect();
            format!("[{}]", faces.join(", "))
        })
        .collect();
    format!(
        "🎲 {base} {}{}",
        chains.join(" "),
        modifier_suffix(fragments)
    )
}

/// Dice pool faces, with hits at or above `threshold` in bold.
pub fn pool_faces(rolls: &[i64], threshold: i64) -> Vec<String> {
    rolls
        .iter()
        .map(|v| {
            if *v >= threshold {
                format!("**{v}**")
            } else {
                v.to_string()
            }
        })
        .collect()
}

/// `🧮 Total: {total}`.
pub fn total_line(total: i64) -> String {
    format!("🧮 Total: {total}")
}

/// `✅ Successes: {count}`.
pub fn successes_line(count: i64) -> String {
    format!("✅ Successes: {count}")
}

/// `💥 Exploded N time(s)`.
pub fn explosions_line(count: usize) -> String {
    let plural = if count == 1 { "" } else { "s" };
    format!("💥 Exploded {count} time{plural}")
}

/// The verdict line appended when a difficulty was supplied.
pub fn outcome_line(outcome: Outcome, comparison: Comparison, difficulty: i64) -> String {
    let against = match comparison {
        Comparison::AtLeast => format!("DC {difficulty}"),
        Comparison::AtMost => format!("target {difficulty}"),
        Comparison::Successes => format!("{difficulty} needed"),
    };
    match outcome {
        Outcome::Success { .. } => format!("✅ Success ({against})"),
        Outcome::Failure { .. } => format!("❌ Failure ({against})"),
    }
}

fn modifier_suffix(fragments: &[String]) -> String {
    fragments.iter().map(|f| format!(" + {f}")).collect()
}
