use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::Constraint,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table, TableState},
};
use std::io;

use crate::lib::calculator::{PolicyComparison, Recommendation};

/// One line of the cost table
#[derive(Debug, Clone, PartialEq)]
pub struct CostRow {
    pub item: String,
    pub tier: String,
    pub months: String,
    pub cost: String,
}

/// Flatten a comparison into table rows
pub fn cost_rows(comparison: &PolicyComparison) -> Vec<CostRow> {
    let d = &comparison.durations;
    let b = &comparison.breakdown;
    let row = |item: &str, tier: &str, months: Option<f64>, cost: f64| CostRow {
        item: item.to_string(),
        tier: tier.to_string(),
        months: months.map_or_else(|| "-".to_string(), |m| format!("{:.4}", m)),
        cost: format!("{:.6}", cost),
    };

    vec![
        row(
            "Initial storage",
            &comparison.starting_tier,
            Some(d.initial_months),
            b.initial_storage,
        ),
        row(
            "Target storage",
            &comparison.target_tier,
            Some(d.target_months),
            b.target_storage,
        ),
        row("Transition", &comparison.target_tier, None, b.transition),
        row(
            "Retrieval",
            &comparison.target_tier,
            Some(d.target_months),
            b.retrieval,
        ),
        row("With policy (total)", "-", Some(d.total_months), comparison.with_policy),
        row(
            "Baseline (no transition)",
            &comparison.starting_tier,
            Some(d.total_months),
            comparison.baseline,
        ),
    ]
}

pub fn display_cost_table(comparison: &PolicyComparison) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, comparison);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    comparison: &PolicyComparison,
) -> io::Result<()> {
    let data = cost_rows(comparison);
    let verdict_color = match comparison.cheaper {
        Recommendation::WithPolicy => Color::Green,
        Recommendation::Baseline => Color::Yellow,
    };
    let title = format!(
        " {} (Press 'q' to quit) ",
        comparison.cheaper.message()
    );

    let mut state = TableState::default();
    state.select(Some(0));

    loop {
        terminal.draw(|f| {
            let area = f.area();

            let header_cells = ["Item", "Storage Class", "Months", "Cost"]
                .iter()
                .map(|h| {
                    Cell::from(*h).style(
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    )
                });
            let header = Row::new(header_cells)
                .style(Style::default().bg(Color::DarkGray))
                .height(1);

            let rows = data.iter().map(|item| {
                Row::new(vec![
                    Cell::from(item.item.clone()),
                    Cell::from(item.tier.clone()),
                    Cell::from(item.months.clone()),
                    Cell::from(item.cost.clone()),
                ])
                .height(1)
            });

            let table = Table::new(
                rows,
                [
                    Constraint::Percentage(35),
                    Constraint::Percentage(25),
                    Constraint::Percentage(15),
                    Constraint::Percentage(25),
                ],
            )
            .header(header)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title.as_str())
                    .title_style(Style::default().fg(verdict_color)),
            )
            .row_highlight_style(Style::default().bg(Color::DarkGray))
            .highlight_symbol(">> ");

            f.render_stateful_widget(table, area, &mut state);
        })?;

        // Handle input
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Down | KeyCode::Char('j') => {
                        let i = match state.selected() {
                            Some(i) if i + 1 < data.len() => i + 1,
                            _ => 0,
                        };
                        state.select(Some(i));
                    }
                    KeyCode::Up | KeyCode::Char('k') => {
                        let i = match state.selected() {
                            Some(0) | None => data.len() - 1,
                            Some(i) => i - 1,
                        };
                        state.select(Some(i));
                    }
                    _ => {}
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lib::calculator::{Calculator, Scenario};
    use crate::lib::pricing::PricingTable;

    #[test]
    fn test_cost_rows_cover_every_component() {
        let scenario = Scenario {
            total_gb: 100.0,
            object_count: 1000,
            retrieved_gb: 2.0,
            initial_days: 30,
            total_days: 365,
        };
        let comparison = Calculator::new(PricingTable::default())
            .compare_policy("standard", "standard_ia", &scenario)
            .unwrap();
        let rows = cost_rows(&comparison);

        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0].tier, "standard");
        assert_eq!(rows[2].months, "-");
        assert_eq!(rows[5].cost, format!("{:.6}", comparison.baseline));
    }
}
