use capacity_tool::{
    CapacityDataset, CapacityReport, load_dataset_from_json, load_table_from_csv,
    save_dataset_to_json,
};
use chrono::NaiveDate;
use polars::prelude::DataFrame;
use std::io::{self, Write};

fn parse_as_of(arg: Option<&str>) -> Result<NaiveDate, String> {
    match arg {
        Some(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .map_err(|_| format!("invalid date '{raw}', expected YYYY-MM-DD")),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

fn render_df_as_text_table(df: &DataFrame) -> String {
    let columns = df.get_columns();
    let col_names: Vec<String> = columns.iter().map(|c| c.name().to_string()).collect();

    let cell = |ci: usize, row_idx: usize| -> String {
        columns[ci]
            .str()
            .ok()
            .and_then(|ca| ca.get(row_idx))
            .unwrap_or("")
            .to_string()
    };

    let mut widths: Vec<usize> = col_names.iter().map(|n| n.len()).collect();
    for ci in 0..columns.len() {
        for row_idx in 0..df.height() {
            let len = cell(ci, row_idx).len();
            if len > widths[ci] {
                widths[ci] = len;
            }
        }
    }

    let mut sep = String::new();
    sep.push('+');
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');

    out.push('|');
    for (i, name) in col_names.iter().enumerate() {
        out.push(' ');
        out.push_str(name);
        let pad = widths[i] - name.len();
        if pad > 0 {
            out.push_str(&" ".repeat(pad));
        }
        out.push(' ');
        out.push('|');
    }
    out.push('\n');
    out.push_str(&sep);
    out.push('\n');

    for row_idx in 0..df.height() {
        out.push('|');
        for ci in 0..columns.len() {
            let s = cell(ci, row_idx);
            out.push(' ');
            out.push_str(&s);
            let pad = widths[ci].saturating_sub(s.len());
            if pad > 0 {
                out.push_str(&" ".repeat(pad));
            }
            out.push(' ');
            out.push('|');
        }
        out.push('\n');
    }

    out.push_str(&sep);
    out.push('\n');
    out
}

fn print_help() {
    println!(
        "Commands:\n  help                               Show this help\n  roster <csv_path>                  Load the team roster table\n  projects <csv_path>                Load the project data table\n  show <roster|projects>             Render a loaded table\n  summary [YYYY-MM-DD]               Print the executive summary\n  individuals [YYYY-MM-DD]           Print per-resource capacity\n  departments [YYYY-MM-DD]           Print department projections\n  report [YYYY-MM-DD]                Print summary, individuals, departments\n  save <json_path>                   Persist both tables to disk\n  load <json_path>                   Load both tables from disk\n  quit|exit                          Exit"
    );
}

fn fmt_hours(value: f64) -> String {
    format!("{value:.1}")
}

fn fmt_pct(value: f64) -> String {
    if value.is_finite() {
        format!("{value:.1}%")
    } else {
        "n/a".to_string()
    }
}

fn print_summary(report: &CapacityReport) {
    let summary = &report.executive_summary;
    println!("Total resources    : {}", summary.total_resources);
    println!(
        "Annual capacity    : {}",
        fmt_hours(summary.total_annual_capacity)
    );
    println!(
        "Allocated hours    : {}",
        fmt_hours(summary.total_allocated_hours)
    );
    println!(
        "Available hours    : {}",
        fmt_hours(summary.total_available_hours)
    );
    println!(
        "Overall utilization: {}",
        fmt_pct(summary.overall_utilization)
    );
    println!("Over-utilized      : {}", summary.over_utilized_count);
    println!("Under-utilized     : {}", summary.under_utilized_count);
    if !summary.top_available.is_empty() {
        println!("Top available:");
        for entry in &summary.top_available {
            println!(
                "  {:<28} {:>8} hrs available",
                entry.name,
                fmt_hours(entry.available_hours)
            );
        }
    }
    if !summary.top_over_utilized.is_empty() {
        println!("Top over-utilized:");
        for entry in &summary.top_over_utilized {
            println!(
                "  {:<28} {:>8} utilization",
                entry.name,
                fmt_pct(entry.utilization)
            );
        }
    }
}

fn print_individuals(report: &CapacityReport) {
    println!(
        "{:<28} {:<14} {:>10} {:>10} {:>8}  {}",
        "Name", "Department", "Allocated", "Available", "Util", "Status"
    );
    for entry in &report.individual_capacity {
        println!(
            "{:<28} {:<14} {:>10} {:>10} {:>8}  {}",
            entry.name,
            entry.department,
            fmt_hours(entry.allocated_hours),
            fmt_hours(entry.available_hours),
            fmt_pct(entry.utilization),
            entry.status.as_str()
        );
    }
}

fn print_departments(report: &CapacityReport) {
    for dept in &report.departments {
        println!(
            "{} ({} resources, {} hrs capacity, {} allocated, {} utilization)",
            dept.name,
            dept.resource_count,
            fmt_hours(dept.total_capacity),
            fmt_hours(dept.allocated_hours),
            fmt_pct(dept.utilization)
        );
        println!("  Monthly:");
        for projection in &dept.monthly_projections {
            println!(
                "    {:<10} allocated {:>9}, capacity {:>9}, {} utilized",
                projection.period,
                fmt_hours(projection.allocated_hours),
                fmt_hours(projection.capacity),
                fmt_pct(projection.utilization)
            );
        }
        println!("  Quarterly:");
        for projection in &dept.quarterly_projections {
            println!(
                "    {:<10} allocated {:>9}, capacity {:>9}, {} utilized",
                projection.period,
                fmt_hours(projection.allocated_hours),
                fmt_hours(projection.capacity),
                fmt_pct(projection.utilization)
            );
        }
    }
}

fn report_for(dataset: &CapacityDataset, arg: Option<&str>) -> Option<CapacityReport> {
    match parse_as_of(arg) {
        Ok(as_of) => Some(dataset.report(as_of)),
        Err(message) => {
            println!("{message}");
            None
        }
    }
}

fn main() {
    let mut dataset = CapacityDataset::new();
    println!("capacity-tool CLI. Type 'help' for commands.");

    let stdin = io::stdin();
    loop {
        print!("> ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match stdin.read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(err) => {
                eprintln!("input error: {err}");
                break;
            }
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let mut parts = line.split_whitespace();
        let command = parts.next().unwrap_or_default();

        match command {
            "help" => print_help(),
            "quit" | "exit" => break,
            "roster" => match parts.next() {
                Some(path) => match load_table_from_csv(path) {
                    Ok(table) => {
                        let rows = table.height();
                        dataset.set_roster(table);
                        println!("Roster loaded from {path} ({rows} rows).");
                    }
                    Err(err) => println!("Failed to load roster: {err}"),
                },
                None => println!("Usage: roster <csv_path>"),
            },
            "projects" => match parts.next() {
                Some(path) => match load_table_from_csv(path) {
                    Ok(table) => {
                        let rows = table.height();
                        dataset.set_projects(table);
                        println!("Projects loaded from {path} ({rows} rows).");
                    }
                    Err(err) => println!("Failed to load projects: {err}"),
                },
                None => println!("Usage: projects <csv_path>"),
            },
            "show" => match parts.next() {
                Some("roster") => print!("{}", render_df_as_text_table(dataset.roster())),
                Some("projects") => print!("{}", render_df_as_text_table(dataset.projects())),
                _ => println!("Usage: show <roster|projects>"),
            },
            "summary" => {
                if let Some(report) = report_for(&dataset, parts.next()) {
                    print_summary(&report);
                }
            }
            "individuals" => {
                if let Some(report) = report_for(&dataset, parts.next()) {
                    print_individuals(&report);
                }
            }
            "departments" => {
                if let Some(report) = report_for(&dataset, parts.next()) {
                    print_departments(&report);
                }
            }
            "report" => {
                if let Some(report) = report_for(&dataset, parts.next()) {
                    print_summary(&report);
                    println!();
                    print_individuals(&report);
                    println!();
                    print_departments(&report);
                }
            }
            "save" => match parts.next() {
                Some(path) => match save_dataset_to_json(&dataset, path) {
                    Ok(()) => println!("Dataset saved to {path}."),
                    Err(err) => println!("Failed to save dataset: {err}"),
                },
                None => println!("Usage: save <json_path>"),
            },
            "load" => match parts.next() {
                Some(path) => match load_dataset_from_json(path) {
                    Ok(loaded) => {
                        dataset = loaded;
                        println!("Dataset loaded from {path}.");
                    }
                    Err(err) => println!("Failed to load dataset: {err}"),
                },
                None => println!("Usage: load <json_path>"),
            },
            other => println!("Unknown command '{other}'. Type 'help' for commands."),
        }
    }
}
