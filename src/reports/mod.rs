use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use strandcut::catalog::ProductCatalog;
use strandcut::measurement::{format_value, format_with_fraction, Measurement};
use strandcut::report::ReportData;
use strandcut::section::{CrossSection, PathSegment};
use strandcut::slippage::{ScopeTotals, SlippageStatistics};
use strandcut::strands::{ActiveStrands, StrandPattern, StrandSlot, StrandSummary};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn right_align(table: &mut Table, from: usize, to: usize) {
    for i in from..=to {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
}

fn header(labels: &[&str]) -> Vec<Cell> {
    labels
        .iter()
        .map(|l| Cell::new(l).add_attribute(Attribute::Bold))
        .collect()
}

/// Red when a past-range reading is involved.
fn value_cell(text: String, exceeds: bool) -> Cell {
    if exceeds {
        Cell::new(text).fg(Color::Red)
    } else {
        Cell::new(text)
    }
}

fn measurement_cell(m: Option<Measurement>) -> Cell {
    match m {
        Some(m) => value_cell(m.display(), m.exceeds()),
        None => Cell::new("—"),
    }
}

pub fn print_catalog(catalog: &ProductCatalog) {
    let mut table = new_table();
    table.set_header(header(&[
        "Product", "Description", "Width", "Height", "Cores", "Core WxH", "Radius",
    ]));

    for g in catalog.iter() {
        table.add_row(vec![
            Cell::new(&g.product_type).fg(Color::Cyan),
            Cell::new(&g.description),
            Cell::new(format!("{:.3}", g.full_width_in)),
            Cell::new(format!("{:.3}", g.height_in)),
            Cell::new(g.num_cores),
            Cell::new(format!("{:.3} x {:.3}", g.core_width_in, g.core_height_in)),
            Cell::new(format!("{:.3}", g.bottom_corner_radius_in)),
        ]);
    }
    right_align(&mut table, 2, 6);
    println!("{}", table);
}

pub fn print_outline(section: &CrossSection) {
    println!(
        "\nSection: {} ({:.3}\" x {:.3}\")",
        section.product_type,
        section.display_width_in(),
        section.height_in
    );

    let mut table = new_table();
    table.set_header(header(&["#", "Op", "X", "Y"]));
    table.add_row(vec![
        Cell::new(0),
        Cell::new("move"),
        Cell::new(format!("{:.4}", section.outline.start.x)),
        Cell::new(format!("{:.4}", section.outline.start.y)),
    ]);
    for (i, segment) in section.outline.segments.iter().enumerate() {
        let op = match segment {
            PathSegment::LineTo { .. } => "line",
            PathSegment::ArcTo { .. } => "arc",
        };
        let to = segment.end();
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(op),
            Cell::new(format!("{:.4}", to.x)),
            Cell::new(format!("{:.4}", to.y)),
        ]);
    }
    right_align(&mut table, 2, 3);
    println!("{}", table);

    if section.voids.is_empty() {
        return;
    }

    let mut voids = new_table();
    voids.set_header(header(&["Core", "Center X", "Center Y", "Rx", "Ry", "Clipped"]));
    for v in &section.voids {
        voids.add_row(vec![
            Cell::new(v.core),
            Cell::new(format!("{:.4}", v.center.x)),
            Cell::new(format!("{:.4}", v.center.y)),
            Cell::new(format!("{:.4}", v.radius_x)),
            Cell::new(format!("{:.4}", v.radius_y)),
            Cell::new(if v.clipped { "yes" } else { "" }),
        ]);
    }
    right_align(&mut voids, 1, 4);
    println!("{}", voids);
}

pub fn print_active_strands(pattern: &StrandPattern, slots: &[StrandSlot], active: &ActiveStrands) {
    println!("\nPattern: {} ({})", pattern.name, pattern.id);

    let mut table = new_table();
    table.set_header(header(&["Strand", "#", "X", "Y", "Dia", "Active"]));
    for slot in slots {
        let is_active = active.contains(&slot.id);
        table.add_row(vec![
            Cell::new(slot.id),
            Cell::new(slot.index),
            Cell::new(format!("{:.3}", slot.coordinate.x)),
            Cell::new(format!("{:.3}", slot.coordinate.y)),
            Cell::new(slot.diameter.map_or("?".to_string(), |d| format!("{}\"", d))),
            if is_active {
                Cell::new("yes").fg(Color::Green)
            } else {
                Cell::new("cut").fg(Color::DarkGrey)
            },
        ]);
    }
    right_align(&mut table, 1, 3);
    println!("{}", table);
}

pub fn print_strand_summary(summary: &StrandSummary) {
    let mut table = new_table();
    table.set_header(header(&["Diameter", "Total", "Active"]));
    for c in &summary.by_class {
        table.add_row(vec![
            Cell::new(c.class.map_or("unrecorded".to_string(), |d| format!("{}\"", d))),
            Cell::new(c.total),
            Cell::new(c.active),
        ]);
    }
    table.add_row(vec![
        Cell::new("All").add_attribute(Attribute::Bold),
        Cell::new(summary.total).add_attribute(Attribute::Bold),
        Cell::new(summary.active).add_attribute(Attribute::Bold),
    ]);
    right_align(&mut table, 1, 2);
    println!("{}", table);
}

pub fn print_strand_slippage(stats: &SlippageStatistics, denominator: u32) {
    let mut table = new_table();
    table.set_header(header(&["Strand", "End 1", "End 2", "Total", "≈"]));
    for s in stats.strands.values() {
        table.add_row(vec![
            Cell::new(s.strand),
            measurement_cell(s.end1),
            measurement_cell(s.end2),
            value_cell(s.display_total(), s.exceeds),
            Cell::new(format!(
                "{}\"",
                strandcut::measurement::to_fraction_with(s.total_in, denominator)
            )),
        ]);
    }
    right_align(&mut table, 1, 4);
    println!("{}", table);
}

fn scope_row(label: &str, scope: &ScopeTotals, denominator: u32) -> Vec<Cell> {
    vec![
        Cell::new(label),
        Cell::new(scope.count),
        value_cell(
            format_with_fraction(scope.total_in, scope.exceeds, denominator),
            scope.exceeds,
        ),
        value_cell(
            format_value(scope.average_in, scope.exceeds),
            scope.exceeds,
        ),
    ]
}

pub fn print_scope_report(stats: &SlippageStatistics, denominator: u32) {
    let mut table = new_table();
    table.set_header(header(&["Scope", "Readings", "Total", "Average"]));

    let scopes = [
        ("End 1", &stats.end1),
        ("End 2", &stats.end2),
        ("Grand", &stats.grand),
    ];
    for (name, breakdown) in scopes {
        table.add_row(scope_row(&format!("{} bottom", name), &breakdown.bottom, denominator));
        table.add_row(scope_row(&format!("{} top", name), &breakdown.top, denominator));
        let mut combined = scope_row(&format!("{} all", name), &breakdown.combined, denominator);
        combined[0] = Cell::new(format!("{} all", name)).add_attribute(Attribute::Bold);
        table.add_row(combined);
    }
    right_align(&mut table, 1, 3);
    println!("{}", table);
}

pub fn print_invalid_entries(stats: &SlippageStatistics) {
    if stats.invalid_entries.is_empty() {
        return;
    }
    println!("\n⚠️  Unreadable entries (counted as 0):");
    for e in &stats.invalid_entries {
        println!("   {} {}: '{}'", e.strand, e.end, e.raw_text);
    }
}

pub fn print_warnings(warnings: &[String]) {
    for w in warnings {
        println!("⚠️  {}", w);
    }
}

pub fn print_report_header(report: &ReportData) {
    println!(
        "\nProduct: {}   Pattern: {} ({})",
        report.product_type, report.pattern_name, report.pattern_id
    );
    match &report.cut {
        Some(cut) => println!(
            "Cut: {:.3}\" keeping {}",
            cut.cut_width_in, cut.keeper_side
        ),
        None => println!("Cut: full width"),
    }
    if let Some(force) = report.required_force_lbs {
        println!("Required force: {:.0} lbs", force);
    }
    print_warnings(&report.warnings);
    if !report.missing_readings.is_empty() {
        let missing: Vec<String> = report
            .missing_readings
            .iter()
            .map(|(id, end)| format!("{} {}", id, end))
            .collect();
        println!("Missing readings: {}", missing.join(", "));
    }
}
