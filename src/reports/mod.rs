use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use gbmad::Report;

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn align_right(table: &mut Table, cols: std::ops::RangeInclusive<usize>) {
    for i in cols {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
}

pub fn print_top_samples(report: &Report, k: usize, labels: Option<&[u8]>) {
    let mut table = new_table();

    let mut header = vec![
        Cell::new("Rank").add_attribute(Attribute::Bold),
        Cell::new("Sample"),
        Cell::new("Score").fg(Color::Cyan),
        Cell::new("Ball"),
        Cell::new("Ball Size"),
    ];
    if labels.is_some() {
        header.push(Cell::new("Label"));
    }
    table.add_row(header);
    align_right(&mut table, 0..=5);

    for (rank, (sample, score)) in report.top(k).into_iter().enumerate() {
        let ball = report.sample_balls[sample];
        let mut row = vec![
            Cell::new(rank + 1).add_attribute(Attribute::Bold),
            Cell::new(sample),
            Cell::new(format!("{:.6}", score)).fg(Color::Cyan),
            Cell::new(ball),
            Cell::new(report.balls[ball].len()),
        ];
        if let Some(l) = labels {
            let cell = if l[sample] == 1 {
                Cell::new("outlier").fg(Color::Red)
            } else {
                Cell::new("inlier")
            };
            row.push(cell);
        }
        table.add_row(row);
    }
    println!("\n🔎 === TOP {} OUTLIERS === 🔎", k.min(report.sample_scores.len()));
    println!("{}", table);
}

pub fn print_balls(report: &Report) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Ball").add_attribute(Attribute::Bold),
        Cell::new("Size"),
        Cell::new("Radius"),
        Cell::new("AD").fg(Color::Cyan),
        Cell::new("Center"),
    ]);
    align_right(&mut table, 0..=3);

    for (i, ball) in report.balls.iter().enumerate() {
        let center = ball
            .center
            .iter()
            .map(|c| format!("{:.3}", c))
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![
            Cell::new(i).add_attribute(Attribute::Bold),
            Cell::new(ball.len()),
            Cell::new(format!("{:.4}", ball.radius)),
            Cell::new(format!("{:.6}", ball.score)).fg(Color::Cyan),
            Cell::new(center),
        ]);
    }
    println!("\n{}", table);
}

pub fn print_walk_summary(report: &Report, auc: Option<f64>) {
    let walk = &report.walk;
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Samples").add_attribute(Attribute::Bold),
        Cell::new("Balls"),
        Cell::new("Iterations"),
        Cell::new("Residual"),
        Cell::new("Converged"),
        Cell::new("ROC AUC"),
    ]);
    align_right(&mut table, 0..=5);

    let converged = if walk.converged {
        Cell::new("yes").fg(Color::Green)
    } else {
        Cell::new("NO").fg(Color::Red).add_attribute(Attribute::Bold)
    };
    table.add_row(vec![
        Cell::new(report.sample_scores.len()),
        Cell::new(report.balls.len()),
        Cell::new(walk.iterations),
        Cell::new(format!("{:.3e}", walk.residual)),
        converged,
        Cell::new(auc.map_or_else(|| "-".to_string(), |a| format!("{:.4}", a))),
    ]);
    println!("\n{}", table);
}
