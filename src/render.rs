//! Output rendering for the terminal chat.
//!
//! This module provides a plain-text renderer for chat transcripts, bureau
//! decision summaries, progress, and history listings.

use std::io::{self, Stdout, Write};

use crate::history::HistoryEntry;
use crate::types::{BureauDecision, ChatMessage, MessageRole};

/// ANSI escape code for dim text (timestamps, session ids).
const ANSI_DIM: &str = "\x1b[2m";

/// ANSI escape code to reset all styling.
const ANSI_RESET: &str = "\x1b[0m";

/// ANSI escape code for cyan text (assistant replies).
const ANSI_CYAN: &str = "\x1b[36m";

/// ANSI escape code for green text (approvals, progress).
const ANSI_GREEN: &str = "\x1b[32m";

/// ANSI escape code for red text (errors, rejections).
const ANSI_RED: &str = "\x1b[31m";

/// ANSI escape code for yellow text (pending decisions, warnings).
const ANSI_YELLOW: &str = "\x1b[33m";

/// Width of the progress bar in characters.
const PROGRESS_BAR_WIDTH: usize = 20;

/// Renders chat output to stdout as plain text with optional ANSI styling.
pub struct PlainTextRenderer {
    stdout: Stdout,
    use_color: bool,
}

impl PlainTextRenderer {
    /// Creates a new PlainTextRenderer with ANSI colors enabled.
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            use_color: true,
        }
    }

    /// Creates a new PlainTextRenderer with specified color setting.
    pub fn with_color(use_color: bool) -> Self {
        Self {
            stdout: io::stdout(),
            use_color,
        }
    }

    /// Whether ANSI styling is enabled.
    pub fn use_color(&self) -> bool {
        self.use_color
    }

    fn flush(&mut self) {
        let _ = self.stdout.flush();
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.use_color {
            format!("{code}{text}{ANSI_RESET}")
        } else {
            text.to_string()
        }
    }

    /// Prints an informational line.
    pub fn print_info(&mut self, info: &str) {
        let line = self.paint(ANSI_DIM, info);
        println!("{line}");
        self.flush();
    }

    /// Prints an error line.
    pub fn print_error(&mut self, error: &str) {
        let line = self.paint(ANSI_RED, error);
        eprintln!("{line}");
    }

    /// Prints a chat message, including any attached decision summary.
    pub fn print_message(&mut self, message: &ChatMessage) {
        match message.role {
            MessageRole::User => {
                println!("You: {}", message.text);
            }
            MessageRole::Assistant if message.is_error => {
                let text = self.paint(ANSI_RED, &message.text);
                println!("{text}");
            }
            MessageRole::Assistant => {
                let text = self.paint(ANSI_CYAN, &message.text);
                println!("{text}");
                if let Some(decision) = &message.decision {
                    print!("{}", self.decision_summary(decision));
                }
            }
        }
        self.flush();
    }

    /// Prints a bureau decision summary block.
    pub fn print_decision(&mut self, decision: &BureauDecision) {
        print!("{}", self.decision_summary(decision));
        self.flush();
    }

    /// Prints a progress bar line.
    pub fn print_progress(&mut self, progress: u8) {
        println!("{}", self.progress_line(progress));
        self.flush();
    }

    /// Prints the history listing, newest first.
    pub fn print_history(&mut self, entries: &[HistoryEntry]) {
        if entries.is_empty() {
            self.print_info("No recorded sessions.");
            return;
        }
        for entry in entries {
            let id = self.paint(ANSI_CYAN, &entry.id);
            let when = entry
                .created_at
                .format(&time::format_description::well_known::Rfc3339)
                .unwrap_or_default();
            let when = self.paint(ANSI_DIM, &when);
            match &entry.preview {
                Some(preview) => println!("  {id}  {when}  {preview}"),
                None => println!("  {id}  {when}"),
            }
        }
        self.flush();
    }

    fn decision_summary(&self, decision: &BureauDecision) -> String {
        let mut out = String::new();
        let status_text = decision.status.to_string();
        let status = if decision.status.is_approved() {
            self.paint(ANSI_GREEN, &status_text)
        } else if decision.status.is_final() {
            self.paint(ANSI_RED, &status_text)
        } else {
            self.paint(ANSI_YELLOW, &status_text)
        };
        out.push_str(&format!("  Decision: {status}\n"));
        if let Some(reason) = &decision.reason {
            out.push_str(&format!("  Reason: {reason}\n"));
        }
        if let Some(emi) = &decision.max_eligible_emi {
            out.push_str(&format!("  Max eligible EMI: {emi}\n"));
        }
        if let Some(ceiling) = decision.treatment_ceiling() {
            out.push_str(&format!("  Max treatment amount: {ceiling}\n"));
        }
        if !decision.emi_plans.is_empty() {
            out.push_str("  Plans:\n");
            for plan in &decision.emi_plans {
                out.push_str(&format!("    - {}\n", plan_line(plan)));
            }
        }
        out
    }

    fn progress_line(&self, progress: u8) -> String {
        let progress = progress.min(100) as usize;
        let filled = progress * PROGRESS_BAR_WIDTH / 100;
        let bar = format!(
            "[{}{}] {progress}%",
            "#".repeat(filled),
            "-".repeat(PROGRESS_BAR_WIDTH - filled),
        );
        if progress >= 100 {
            self.paint(ANSI_GREEN, &bar)
        } else {
            bar
        }
    }
}

fn plan_line(plan: &crate::types::EmiPlan) -> String {
    let mut parts = Vec::new();
    if let Some(emi) = &plan.emi {
        match plan.total_emi {
            Some(months) => parts.push(format!("EMI {emi} x {months}")),
            None => parts.push(format!("EMI {emi}")),
        }
    }
    if let Some(down) = &plan.down_payment {
        parts.push(format!("down payment {down}"));
    }
    if let Some(net) = &plan.net_loan_amount {
        parts.push(format!("loan {net}"));
    }
    if let Some(gross) = &plan.gross_treatment_amount {
        parts.push(format!("treatment {gross}"));
    }
    if parts.is_empty() {
        "(plan details unavailable)".to_string()
    } else {
        parts.join(", ")
    }
}

impl Default for PlainTextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DecisionStatus, EmiPlan};

    fn plan() -> EmiPlan {
        EmiPlan {
            product_id: None,
            emi: Some("4500".to_string()),
            total_emi: Some(12),
            down_payment: Some("5000".to_string()),
            net_loan_amount: Some("54000".to_string()),
            credit_limit_calculated: None,
            gross_treatment_amount: Some("60000".to_string()),
        }
    }

    #[test]
    fn renderer_default_has_color() {
        let renderer = PlainTextRenderer::new();
        assert!(renderer.use_color());
    }

    #[test]
    fn renderer_without_color() {
        let renderer = PlainTextRenderer::with_color(false);
        assert!(!renderer.use_color());
    }

    #[test]
    fn decision_summary_without_color_is_plain() {
        let renderer = PlainTextRenderer::with_color(false);
        let mut decision = BureauDecision::with_status(DecisionStatus::Approved);
        decision.reason = Some("Good credit history".to_string());
        decision.max_eligible_emi = Some("5200".to_string());
        decision.emi_plans = vec![plan()];

        let summary = renderer.decision_summary(&decision);
        assert!(summary.contains("Decision: APPROVED"));
        assert!(summary.contains("Reason: Good credit history"));
        assert!(summary.contains("Max eligible EMI: 5200"));
        assert!(summary.contains("EMI 4500 x 12"));
        assert!(!summary.contains('\x1b'));
    }

    #[test]
    fn decision_summary_colors_approval_green() {
        let renderer = PlainTextRenderer::new();
        let decision = BureauDecision::with_status(DecisionStatus::Approved);
        let summary = renderer.decision_summary(&decision);
        assert!(summary.contains(ANSI_GREEN));
    }

    #[test]
    fn progress_line_shape() {
        let renderer = PlainTextRenderer::with_color(false);
        assert_eq!(renderer.progress_line(0), "[--------------------] 0%");
        assert_eq!(renderer.progress_line(50), "[##########----------] 50%");
        assert_eq!(renderer.progress_line(100), "[####################] 100%");
        // Values above full clamp rather than overflow the bar.
        assert_eq!(renderer.progress_line(250), "[####################] 100%");
    }

    #[test]
    fn plan_line_handles_missing_fields() {
        let empty = EmiPlan::default();
        assert_eq!(plan_line(&empty), "(plan details unavailable)");

        let mut partial = EmiPlan::default();
        partial.emi = Some("2000".to_string());
        assert_eq!(plan_line(&partial), "EMI 2000");
    }
}
