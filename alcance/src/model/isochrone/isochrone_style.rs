/// color used for budgets without a dedicated color
pub const DEFAULT_COLOR: &str = "#3b82f6";

/// fill and stroke color for a time budget.
pub fn budget_color(minutes: u32) -> &'static str {
    match minutes {
        15 => "#22c55e",
        30 => "#eab308",
        45 => "#f97316",
        60 => "#ef4444",
        _ => DEFAULT_COLOR,
    }
}
