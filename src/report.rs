use nongli::{BuildMetrics, DayInfo, LunarDate, LunarInfo, MonthInfo, SolarDate, SolarInfo, YearInfo, YearSpan};
use serde::Serialize;

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const RED: &str = "\x1b[31m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

/// Renders query results either as a colored text report or as JSON.
pub struct Printer {
    palette: ansi::Palette,
    json: bool,
}

impl Printer {
    pub fn new(color: bool, json: bool) -> Self {
        Self { palette: ansi::Palette::new(color && !json), json }
    }

    fn section(&self, title: &str) {
        println!("\n{}", self.palette.paint(format!("━━━ {title} ━━━"), ansi::GRAY));
    }

    fn emit_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<(), serde_json::Error> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    pub fn lunar(&self, date: SolarDate, info: &LunarInfo) -> Result<(), serde_json::Error> {
        if self.json {
            return self.emit_json(info);
        }
        let p = &self.palette;
        println!("\n{}", p.bold(p.paint(format!("☀  {date}  {}", info.weekday), ansi::CYAN)));
        self.section("Lunar");
        println!(
            "  {}{}年  {}{}",
            p.paint(format!("{}{}", info.year_stem, info.year_branch), ansi::GREEN),
            p.dim(format!(" ({})", info.year_num)),
            info.month_name,
            info.day_name,
        );
        println!("  {} {}", p.dim("zodiac:"), info.year_zodiac);
        if !info.solar_term.is_empty() {
            println!("  {} {}", p.dim("solar term:"), p.paint(&info.solar_term, ansi::YELLOW));
        }
        println!();
        Ok(())
    }

    pub fn solar(&self, date: LunarDate, info: SolarInfo) -> Result<(), serde_json::Error> {
        if self.json {
            return self.emit_json(&info);
        }
        let p = &self.palette;
        println!("\n{}", p.bold(p.paint(format!("☾  {date}"), ansi::CYAN)));
        self.section("Solar");
        println!("  {}", p.paint(SolarDate::new(info.year, info.month, info.day).to_string(), ansi::GREEN));
        println!();
        Ok(())
    }

    pub fn year(&self, year: &YearInfo, months: &[MonthInfo]) -> Result<(), serde_json::Error> {
        if self.json {
            #[derive(Serialize)]
            struct YearWithMonths<'a> {
                #[serde(flatten)]
                year: &'a YearInfo,
                months: &'a [MonthInfo],
            }
            return self.emit_json(&YearWithMonths { year, months });
        }
        let p = &self.palette;
        println!(
            "\n{}",
            p.bold(p.paint(format!("{}  {}{}年 ({})", year.num, year.stem, year.branch, year.zodiac), ansi::CYAN))
        );
        self.section(&format!("Months ({})", months.len()));
        for (idx, month) in months.iter().enumerate() {
            let name = if month.leap { p.paint(&month.name, ansi::YELLOW) } else { month.name.clone() };
            println!("  {} {}", p.dim(format!("{:>2}.", idx + 1)), name);
        }
        println!();
        Ok(())
    }

    pub fn month(&self, title: &str, days: &[DayInfo]) -> Result<(), serde_json::Error> {
        if self.json {
            return self.emit_json(days);
        }
        let p = &self.palette;
        println!("\n{}", p.bold(p.paint(title, ansi::CYAN)));
        self.section(&format!("Days ({})", days.len()));
        for day in days {
            let term = if day.solar_term.is_empty() { String::new() } else { p.paint(&day.solar_term, ansi::YELLOW) };
            println!("  {}  {}  {}", day.name, p.dim(day.weekday), term);
        }
        println!();
        Ok(())
    }

    pub fn years(&self, years: &[YearInfo]) -> Result<(), serde_json::Error> {
        if self.json {
            return self.emit_json(years);
        }
        let p = &self.palette;
        self.section(&format!("Years ({})", years.len()));
        for year in years {
            println!("  {}  {}{}  {}", p.dim(year.num.to_string()), year.stem, year.branch, year.zodiac);
        }
        println!();
        Ok(())
    }

    pub fn stats(&self, span: YearSpan, days: usize, metrics: &BuildMetrics) -> Result<(), serde_json::Error> {
        if self.json {
            return self.emit_json(&serde_json::json!({
                "span": { "start": span.start, "end": span.end },
                "days": days,
                "files": metrics.files,
                "lines": metrics.lines,
                "rows": metrics.rows,
                "skipped": metrics.skipped,
                "elapsed_ms": metrics.total.as_secs_f64() * 1e3,
            }));
        }
        let p = &self.palette;
        self.section("Feed");
        println!("  Span: {}..{}  │  Files: {}  │  Lines: {}", span.start, span.end, metrics.files, metrics.lines);
        println!(
            "  Rows: {}  │  Skipped: {}  │  Days: {}",
            p.paint(metrics.rows.to_string(), ansi::GREEN),
            p.dim(metrics.skipped.to_string()),
            days
        );
        self.section("Timing");
        println!(
            "  Total: {}  │  Read: {}  │  Resolve: {}  │  Index: {}",
            p.paint(format!("{:?}", metrics.total), ansi::GREEN),
            p.paint(format!("{:?}", metrics.read), ansi::CYAN),
            p.dim(format!("{:?}", metrics.resolve)),
            p.dim(format!("{:?}", metrics.index)),
        );
        println!();
        Ok(())
    }

    pub fn not_found(&self, what: &str) {
        eprintln!("{}", self.palette.paint(format!("not found: {what} is outside the calendar"), ansi::RED));
    }
}
