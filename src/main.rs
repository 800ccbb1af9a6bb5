// Copyright 2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

mod cli;
mod config;
mod console_format;
mod report;
mod sample;
mod source;
mod store;
mod types;
mod ui;

use log::info;
use types::*;

fn main() {
    env_logger::init();

    // Parse CLI arguments
    let args = cli::CliArgs::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        ui::print_error(&e);
        std::process::exit(1);
    }

    // Set console width override if specified
    if let Some(width) = args.console_width {
        console_format::set_console_width(width);
    }

    // Resolve configuration
    let config = match config::build_report_config(&args) {
        Ok(c) => c,
        Err(e) => {
            ui::print_error(&format!("Configuration error: {}", e));
            std::process::exit(1);
        }
    };

    // Seed the database if requested
    if args.should_seed() {
        match store::seed_database(&config.db_path) {
            Ok(count) => {
                ui::status(&format!(
                    "Inventory database '{}' created and populated with {} items",
                    config.db_path.display(),
                    count
                ));
            }
            Err(e) => {
                ui::print_error(&format!("Failed to seed {}: {}", config.db_path.display(), e));
                std::process::exit(1);
            }
        }
        if config.seed == SeedMode::SeedOnly {
            return;
        }
    }

    // Load items, falling back to sample data when allowed
    let inventory = match source::resolve(&config) {
        Ok(inventory) => inventory,
        Err(e) => {
            ui::print_error(&format!("Failed to load {}: {}", config.db_path.display(), e));
            std::process::exit(1);
        }
    };
    println!();

    let report = report::build_report(&inventory, &config);
    info!("Report built for {} items", report.total_items);

    if let Err(e) = report::print_report(&report, config.use_colors) {
        ui::print_error(&format!("Failed to write report: {}", e));
        std::process::exit(1);
    }

    generate_exports(&report, &config);
}

/// Write the optional JSON and Markdown copies of the report
fn generate_exports(report: &report::InventoryReport, config: &ReportConfig) {
    if let Some(ref path) = config.json_path {
        match report::export_json_report(report, path) {
            Ok(_) => println!("\nJSON report saved to: {}", path.display()),
            Err(e) => ui::print_warning(&format!("Failed to save JSON report: {}", e)),
        }
    }

    if let Some(ref path) = config.markdown_path {
        match report::export_markdown_report(report, path) {
            Ok(_) => println!("\nMarkdown report saved to: {}", path.display()),
            Err(e) => ui::print_warning(&format!("Failed to save markdown report: {}", e)),
        }
    }
}
