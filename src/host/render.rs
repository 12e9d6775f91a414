use std::fmt::Write;

use crate::engine::{RunPhase, RunState};
use crate::recipe::Recipe;

/// Text snapshot of a run: title, step list, countdown line.
pub fn render(recipe: &Recipe, state: &RunState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", recipe.name);

    for (index, step) in recipe.steps.iter().enumerate() {
        let marker = if state.is_completed(index) {
            "✓"
        } else if index == state.current_step {
            "▶"
        } else {
            " "
        };
        let auto = if step.auto_advance { " ⬇" } else { "" };
        let _ = writeln!(
            out,
            "{marker} {}. {} ({}s){auto}",
            index + 1,
            step.description,
            step.duration_secs
        );
    }

    let status = match state.phase() {
        RunPhase::Running => "running",
        RunPhase::Idle => "paused",
        RunPhase::Terminal => "done",
    };
    let _ = writeln!(out, "[{status}] {}s remaining", state.remaining_secs);
    out
}

/// One line per recipe: id, name, step count, total time.
pub fn render_list(recipes: &[Recipe]) -> String {
    if recipes.is_empty() {
        return "no recipes\n".to_string();
    }
    let mut out = String::new();
    for recipe in recipes {
        let _ = writeln!(
            out,
            "{}  {}  ({} steps, {}s)",
            recipe.id,
            recipe.name,
            recipe.steps.len(),
            recipe.total_secs()
        );
    }
    out
}
