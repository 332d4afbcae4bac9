//! Output renderers for a combination report: text table, JSON and CSV.

use std::io::Write;

use combo_core::loads::Load;
use combo_core::CombinationReport;
use serde::Serialize;

/// Column headers shared by the table and CSV outputs
pub const HEADERS: [&str; 6] = ["Nº", "Combinação de Carga", "Tipo", "Frequência", "Critério", "Q [kN/m²]"];

/// One flattened output row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    #[serde(rename = "Nº")]
    pub number: usize,
    #[serde(rename = "Combinação de Carga")]
    pub description: String,
    #[serde(rename = "Tipo")]
    pub limit_state: &'static str,
    #[serde(rename = "Frequência")]
    pub frequency: &'static str,
    #[serde(rename = "Critério")]
    pub criterion: &'static str,
    #[serde(rename = "Q [kN/m²]")]
    pub design_value: f64,
}

pub fn rows(report: &CombinationReport) -> Vec<Row> {
    report
        .combinations
        .iter()
        .map(|combo| Row {
            number: combo.number,
            description: combo.description.clone(),
            limit_state: combo.rule.limit_state().code(),
            frequency: combo.rule.frequency(),
            criterion: combo.criterion.label(),
            design_value: combo.design_value,
        })
        .collect()
}

/// Plain text table, columns padded to their widest cell
pub fn write_table<W: Write + ?Sized>(report: &CombinationReport, decimals: u32, out: &mut W) -> std::io::Result<()> {
    let precision = decimals as usize;
    let cells: Vec<[String; 6]> = rows(report)
        .into_iter()
        .map(|row| {
            [
                row.number.to_string(),
                row.description,
                row.limit_state.to_string(),
                row.frequency.to_string(),
                row.criterion.to_string(),
                format!("{:.precision$}", row.design_value),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    write_line(out, &HEADERS.map(String::from), &widths)?;
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    writeln!(out, "{}", rule.join("-+-"))?;
    for row in &cells {
        write_line(out, row, &widths)?;
    }
    Ok(())
}

fn write_line<W: Write + ?Sized>(out: &mut W, cells: &[String; 6], widths: &[usize; 6]) -> std::io::Result<()> {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths.iter())
        .enumerate()
        .map(|(i, (cell, width))| {
            let pad = width.saturating_sub(cell.chars().count());
            // numeric columns right-aligned
            if i == 0 || i == 5 {
                format!("{}{}", " ".repeat(pad), cell)
            } else {
                format!("{}{}", cell, " ".repeat(pad))
            }
        })
        .collect();
    writeln!(out, "{}", padded.join(" | ").trim_end())
}

/// Legend of the input loads, printed under the table
///
/// One line per load: id, class symbol, signed value, category and usage
/// class descriptions.
pub fn write_legend<W: Write + ?Sized>(loads: &[Load], out: &mut W) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Cargas:")?;
    for load in loads {
        let usage = load.usage_class.map(|u| u.description()).unwrap_or("N/A");
        writeln!(
            out,
            "  {} ({}) = {:.2}: {} | {}",
            load.id,
            load.class.code(),
            load.signed_value(),
            load.category.description(),
            usage
        )?;
    }
    Ok(())
}

/// CSV with the same columns as the table
pub fn write_csv<W: Write>(report: &CombinationReport, out: W) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(out);
    for row in rows(report) {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Pretty JSON of the full report
pub fn write_json<W: Write + ?Sized>(report: &CombinationReport, out: &mut W) -> std::io::Result<()> {
    let json = serde_json::to_string_pretty(report).map_err(std::io::Error::other)?;
    writeln!(out, "{json}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use combo_core::loads::{ActionCategory, UsageClass};
    use combo_core::{generate, CombinationRule, EngineSettings};

    fn loads() -> Vec<Load> {
        vec![
            Load::permanent("G1", 5.0, ActionCategory::MetalSelfWeight),
            Load::variable("Q1", 3.0, ActionCategory::GenericVariable, UsageClass::FixedEquipment),
        ]
    }

    fn report() -> CombinationReport {
        generate(
            &loads(),
            &[CombinationRule::UlsNormal, CombinationRule::SlsQuasiPermanent],
            &EngineSettings::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_rows() {
        let rows = rows(&report());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].limit_state, "ELU");
        assert_eq!(rows[0].criterion, "Resistência");
        assert_eq!(rows[1].frequency, "Quase-permanente");
        assert_eq!(rows[1].criterion, "Conforto Visual");
    }

    #[test]
    fn test_table_output() {
        let mut out = Vec::new();
        write_table(&report(), 3, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Nº"));
        assert!(lines[2].contains("1.25*G1 + 1.50*Q1"));
        assert!(lines[2].ends_with("10.750"));
    }

    #[test]
    fn test_legend() {
        let mut out = Vec::new();
        write_legend(&loads(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], "Cargas:");
        assert_eq!(lines[2], "  G1 (G) = 5.00: Peso próprio de estruturas metálicas | N/A");
        assert_eq!(
            lines[3],
            "  Q1 (Q) = 3.00: Ações variáveis genéricas | Locais com predominância de pesos/equipamentos fixos"
        );
    }

    #[test]
    fn test_csv_output() {
        let mut out = Vec::new();
        write_csv(&report(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let mut lines = text.lines();
        assert_eq!(lines.next().unwrap(), "Nº,Combinação de Carga,Tipo,Frequência,Critério,Q [kN/m²]");
        assert_eq!(lines.next().unwrap(), "1,1.25*G1 + 1.50*Q1,ELU,Normal,Resistência,10.75");
        assert_eq!(lines.next().unwrap(), "2,1.00*G1 + 0.20*Q1,ELS,Quase-permanente,Conforto Visual,5.6");
    }

    #[test]
    fn test_json_output() {
        let mut out = Vec::new();
        write_json(&report(), &mut out).unwrap();
        let parsed: CombinationReport = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed, report());
    }
}
