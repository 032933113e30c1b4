//! Text rendering of circuits.
//!
//! Produces a wire diagram in the style of the usual terminal drawers:
//!
//! ```text
//! q_0: ─┤ H ├──■───░─┤M:0├──────────
//!              │   ░
//! q_1: ────────X───░───────┤M:1├────
//! ```

use crate::circuit::Circuit;
use crate::gate::StandardGate;
use crate::instruction::{Instruction, InstructionKind};

#[derive(Debug, Clone, Default)]
struct Column {
    /// Cell text per qubit row.
    cells: Vec<Option<String>>,
    /// Whether a vertical connector crosses the gap below each row.
    links: Vec<bool>,
}

impl Column {
    fn new(num_qubits: usize) -> Self {
        Self {
            cells: vec![None; num_qubits],
            links: vec![false; num_qubits.saturating_sub(1)],
        }
    }

    fn width(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .map(|c| c.chars().count())
            .max()
            .unwrap_or(1)
            + 2
    }
}

fn boxed(label: &str) -> String {
    format!("┤ {label} ├")
}

/// Cells for one instruction, keyed by qubit row.
fn cells_for(inst: &Instruction) -> Vec<(usize, String)> {
    let rows: Vec<usize> = inst.qubits.iter().map(|q| q.0 as usize).collect();
    match &inst.kind {
        InstructionKind::Gate(gate) => match gate {
            StandardGate::CX | StandardGate::CY | StandardGate::CZ => {
                let target = match gate {
                    StandardGate::CX => "X".to_string(),
                    StandardGate::CY => boxed("Y"),
                    _ => "■".to_string(),
                };
                vec![(rows[0], "■".into()), (rows[1], target)]
            }
            StandardGate::CCX => vec![
                (rows[0], "■".into()),
                (rows[1], "■".into()),
                (rows[2], "X".into()),
            ],
            StandardGate::Swap => vec![(rows[0], "x".into()), (rows[1], "x".into())],
            other => {
                let label = boxed(&other.label());
                rows.into_iter().map(|r| (r, label.clone())).collect()
            }
        },
        InstructionKind::Measure => rows
            .into_iter()
            .zip(&inst.clbits)
            .map(|(r, c)| (r, format!("┤M:{}├", c.0)))
            .collect(),
        InstructionKind::Reset => rows.into_iter().map(|r| (r, "|0>".into())).collect(),
        InstructionKind::Barrier => rows.into_iter().map(|r| (r, "░".into())).collect(),
    }
}

/// Whether the instruction is drawn as a single connected column.
fn is_connected(inst: &Instruction) -> bool {
    inst.is_gate() && inst.qubits.len() > 1
}

fn layout(circuit: &Circuit) -> Vec<Column> {
    let n = circuit.num_qubits();
    let mut levels = vec![0usize; n];
    let mut columns: Vec<Column> = Vec::new();

    // Multi-qubit measurements are drawn one qubit per column.
    let instructions = circuit.instructions().into_iter().flat_map(|inst| {
        if inst.is_measure() && inst.qubits.len() > 1 {
            inst.qubits
                .iter()
                .zip(&inst.clbits)
                .map(|(&q, &c)| Instruction::measure(q, c))
                .collect()
        } else {
            vec![inst]
        }
    });

    for inst in instructions {
        let cells = cells_for(&inst);
        let Some(lo) = cells.iter().map(|(r, _)| *r).min() else {
            continue;
        };
        let hi = cells.iter().map(|(r, _)| *r).max().unwrap_or(lo);
        // Every row between the outermost operands is reserved, even for
        // unconnected cells, so nothing else is drawn across the span.
        let span = lo..=hi;

        let col = span.clone().map(|r| levels[r]).max().unwrap_or(0);
        while columns.len() <= col {
            columns.push(Column::new(n));
        }
        let column = &mut columns[col];
        for (row, text) in cells {
            column.cells[row] = Some(text);
        }
        if is_connected(&inst) {
            for gap in lo..hi {
                column.links[gap] = true;
            }
            for row in lo + 1..hi {
                if column.cells[row].is_none() {
                    column.cells[row] = Some("┼".into());
                }
            }
        } else if inst.is_barrier() {
            for gap in lo..hi {
                column.links[gap] = true;
            }
        }
        for r in span {
            levels[r] = col + 1;
        }
    }

    columns
}

fn centered(text: &str, width: usize, fill: char) -> String {
    let len = text.chars().count();
    let left = (width.saturating_sub(len)) / 2;
    let right = width.saturating_sub(len + left);
    let mut out = String::with_capacity(width * 3);
    out.extend(std::iter::repeat_n(fill, left));
    out.push_str(text);
    out.extend(std::iter::repeat_n(fill, right));
    out
}

/// Render the circuit as a multi-line text diagram.
pub fn draw(circuit: &Circuit) -> String {
    let n = circuit.num_qubits();
    let columns = layout(circuit);
    let labels: Vec<String> = (0..n).map(|i| format!("q_{i}: ")).collect();
    let label_width = labels.iter().map(String::len).max().unwrap_or(0);

    let mut lines = Vec::with_capacity(2 * n + 1);
    for (row, label) in labels.iter().enumerate() {
        let mut line = format!("{label:>label_width$}─");
        for column in &columns {
            let width = column.width();
            match &column.cells[row] {
                Some(cell) => line.push_str(&centered(cell, width, '─')),
                None => line.push_str(&centered("", width, '─')),
            }
        }
        line.push('─');
        lines.push(line);

        if row + 1 < n {
            let mut gap = " ".repeat(label_width + 1);
            for column in &columns {
                let mark = if column.links[row] { "│" } else { "" };
                gap.push_str(&centered(mark, column.width(), ' '));
            }
            lines.push(gap.trim_end().to_string());
        }
    }

    if circuit.num_clbits() > 0 {
        let register = circuit
            .clbits()
            .first()
            .and_then(|c| c.register.clone())
            .unwrap_or_else(|| "c".into());
        lines.push(format!(
            "{:>label_width$}═{}/",
            format!("{register}: "),
            circuit.num_clbits()
        ));
    }

    lines.join("\n")
}

impl Circuit {
    /// Render the circuit as a text diagram.
    pub fn draw(&self) -> String {
        draw(self)
    }
}

impl std::fmt::Display for Circuit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&draw(self))
    }
}
