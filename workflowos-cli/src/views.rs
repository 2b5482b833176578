//! Text renderers shared by the widget commands, the dashboard page and the shell.

use std::io::Write;

use colored::{Color, ColoredString, Colorize};

use workflowos_dashboard::page::{RulesSection, TimelineSection};
use workflowos_dashboard::{
    ActivityRow, DashboardPage, Header, MetricCardView, Presentation, StatusPill, TestingProgress,
    Tone, activity, testing, timeline,
};

const PROGRESS_BAR_WIDTH: usize = 30;

pub fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Success => Color::Green,
        Tone::Destructive => Color::Red,
        Tone::Warning => Color::Yellow,
        Tone::Primary => Color::Blue,
        Tone::Accent => Color::Magenta,
        Tone::Muted => Color::BrightBlack,
    }
}

pub fn paint(text: &str, tone: Tone) -> ColoredString {
    text.color(tone_color(tone))
}

fn glyph(p: &Presentation) -> ColoredString {
    paint(p.glyph, p.tone)
}

fn section_title(w: &mut dyn Write, title: &str, subtitle: &str) -> std::io::Result<()> {
    writeln!(w, "{}", title.bold())?;
    writeln!(w, "{}", subtitle.dimmed())?;
    writeln!(w)
}

pub fn write_header(w: &mut dyn Write, header: &Header) -> std::io::Result<()> {
    let nav: Vec<String> = header
        .nav
        .iter()
        .map(|n| {
            if n.active {
                n.label.bold().to_string()
            } else {
                n.label.dimmed().to_string()
            }
        })
        .collect();
    writeln!(
        w,
        "{}  {}    🔔 {}",
        header.product.bold(),
        nav.join("  "),
        header.notification_count.to_string().blue()
    )?;
    writeln!(w, "{}", "─".repeat(72).dimmed())
}

pub fn write_metrics(w: &mut dyn Write, cards: &[MetricCardView<'_>]) -> std::io::Result<()> {
    for view in cards {
        let card = view.card;
        write!(w, "{:<22} {:>10}", card.title, card.value.to_string().bold())?;
        if let (Some(label), Some(tone)) = (&view.trend_label, view.trend_tone) {
            write!(w, "  {}", paint(label, tone))?;
        }
        writeln!(w)?;
        if let Some(subtitle) = &card.subtitle {
            writeln!(w, "{:<22} {}", "", subtitle.dimmed())?;
        }
    }
    Ok(())
}

pub fn write_quick_status(w: &mut dyn Write, pills: &[StatusPill]) -> std::io::Result<()> {
    let rendered: Vec<String> = pills
        .iter()
        .map(|p| paint(&format!("{} {}", p.glyph, p.text), p.tone).to_string())
        .collect();
    writeln!(w, "{}", rendered.join("   "))
}

pub fn write_timeline(w: &mut dyn Write, section: &TimelineSection<'_>) -> std::io::Result<()> {
    writeln!(
        w,
        "{}  [{}]",
        timeline::TITLE.bold(),
        section.employee.cyan()
    )?;
    writeln!(w, "{}", timeline::SUBTITLE.dimmed())?;
    writeln!(w)?;
    for row in &section.steps {
        let event = row.event;
        writeln!(
            w,
            "{} {:<26} {}",
            glyph(&row.presentation),
            event.title,
            paint(row.presentation.label, row.presentation.tone)
        )?;
        writeln!(w, "│   {}", event.description.dimmed())?;
        writeln!(w, "│   {}", event.timestamp.dimmed())?;
        if !row.is_last {
            writeln!(w, "│")?;
        }
    }
    Ok(())
}

pub fn write_rules(w: &mut dyn Write, section: &RulesSection<'_>) -> std::io::Result<()> {
    section_title(w, "Configuration Rules", &section.summary)?;
    for row in &section.rules {
        let rule = row.rule;
        writeln!(
            w,
            "{} {:<3} {:<30} {:<16} {:<8} {}",
            glyph(&row.presentation),
            rule.id,
            rule.name,
            format!("[{}]", rule.category).dimmed(),
            paint(row.presentation.label, row.presentation.tone),
            rule.last_validated.dimmed()
        )?;
        writeln!(w, "      {}", rule.description.dimmed())?;
    }
    Ok(())
}

pub fn write_activity(w: &mut dyn Write, rows: &[ActivityRow<'_>]) -> std::io::Result<()> {
    section_title(w, activity::TITLE, activity::SUBTITLE)?;
    for row in rows {
        let event = row.event;
        writeln!(
            w,
            "{} {:<32} {}",
            glyph(&row.presentation),
            event.title,
            event.timestamp.dimmed()
        )?;
        writeln!(w, "  {}", event.description.dimmed())?;
        if let Some(by) = row.attribution() {
            writeln!(w, "  {}", by.dimmed())?;
        }
    }
    Ok(())
}

pub fn progress_bar(percentage: u32) -> String {
    let pct = usize::try_from(percentage.min(100)).unwrap_or(100);
    let filled = PROGRESS_BAR_WIDTH * pct / 100;
    format!(
        "{}{}",
        "█".repeat(filled).green(),
        "░".repeat(PROGRESS_BAR_WIDTH - filled).dimmed()
    )
}

pub fn write_testing(w: &mut dyn Write, progress: &TestingProgress<'_>) -> std::io::Result<()> {
    writeln!(
        w,
        "{}  [{}]",
        testing::TITLE.bold(),
        progress.run_label()
    )?;
    writeln!(w, "{}", testing::SUBTITLE.dimmed())?;
    writeln!(w)?;
    writeln!(
        w,
        "{}  {}  {}%",
        progress.summary(),
        progress_bar(progress.percentage),
        progress.percentage
    )?;
    for row in &progress.tests {
        let case = row.case;
        let duration = case.duration().map(|d| d.to_string()).unwrap_or_default();
        writeln!(
            w,
            "{} {:<3} {:<34} {}",
            glyph(&row.presentation),
            case.id(),
            case.name(),
            duration.dimmed()
        )?;
    }
    Ok(())
}

pub fn write_page(w: &mut dyn Write, page: &DashboardPage<'_>) -> std::io::Result<()> {
    write_header(w, page.header)?;
    writeln!(w)?;
    section_title(w, page.title, page.subtitle)?;
    write_metrics(w, &page.metrics)?;
    writeln!(w)?;
    write_quick_status(w, &page.quick_status)?;
    writeln!(w)?;
    write_timeline(w, &page.timeline)?;
    writeln!(w)?;
    write_rules(w, &page.rules)?;
    writeln!(w)?;
    write_activity(w, &page.activity)?;
    writeln!(w)?;
    write_testing(w, &page.testing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use workflowos_core::fixtures;
    use workflowos_core::notify::MemoryNotifier;
    use workflowos_dashboard::Dashboard;
    use workflowos_test_runner::TestSuite;

    fn render(f: impl FnOnce(&mut dyn Write) -> std::io::Result<()>) -> String {
        colored::control::set_override(false);
        let mut buffer = Vec::new();
        f(&mut buffer).expect("rendering should succeed");
        String::from_utf8(buffer).expect("valid UTF-8")
    }

    #[test]
    fn test_progress_bar_width() {
        colored::control::set_override(false);
        assert_eq!(progress_bar(0).chars().count(), PROGRESS_BAR_WIDTH);
        assert_eq!(progress_bar(100), "█".repeat(PROGRESS_BAR_WIDTH));
        assert_eq!(progress_bar(250), "█".repeat(PROGRESS_BAR_WIDTH));
    }

    #[test]
    fn test_page_renders_every_section() {
        let dashboard = Dashboard::from_fixtures(Arc::new(MemoryNotifier::new()));
        let suite = TestSuite::new(fixtures::test_cases());
        let output = render(|w| write_page(w, &dashboard.page(&suite, false)));

        for expected in [
            "WorkflowOS",
            "Workflow Dashboard",
            "+15% vs last week",
            "1 integration needs attention",
            "Sarah Chen",
            "in progress",
            "4/6 rules passing validation",
            "by HR Admin",
            "3/8 tests passed",
            "38%",
            "1.2s",
        ] {
            assert!(output.contains(expected), "missing '{expected}' in:\n{output}");
        }
    }
}
