use crate::calendar::format_date;
use crate::grid::ScheduleGrid;
use crate::model::{RawLeaveMarker, StaffMember};
use anyhow::{bail, Context};
use csv::{ReaderBuilder, WriterBuilder};
use std::path::Path;

/// Import du personnel depuis CSV: header
/// `id,full_name[,username][,is_emergency][,leave_markers]`, marqueurs séparés
/// par `;`.
pub fn import_staff_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<StaffMember>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let raw_id = rec.get(0).context("missing id")?.trim();
        let id: i64 = raw_id
            .parse()
            .with_context(|| format!("invalid staff id: {raw_id}"))?;
        let mut member = StaffMember::new(id);

        let name = rec.get(1).context("missing full_name")?.trim();
        if !name.is_empty() {
            member.full_name = Some(name.to_string());
        }
        if let Some(username) = rec.get(2).map(str::trim).filter(|s| !s.is_empty()) {
            member.username = Some(username.to_string());
        }
        if member.full_name.is_none() && member.username.is_none() {
            bail!("staff row {id} has neither full_name nor username");
        }
        if let Some(flag) = rec.get(3).map(str::trim).filter(|s| !s.is_empty()) {
            member.is_emergency_staff = parse_bool(flag)
                .with_context(|| format!("invalid is_emergency value for id {id}"))?;
        }
        if let Some(markers) = rec.get(4) {
            member.leave_markers = parse_markers(markers);
        }
        out.push(member);
    }
    Ok(out)
}

fn parse_bool(s: &str) -> anyhow::Result<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "y" | "evet" => Ok(true),
        "false" | "0" | "no" | "n" | "hayır" | "hayir" => Ok(false),
        _ => bail!("expected boolean"),
    }
}

// Les marqueurs restent bruts : la classification se fait dans le moteur.
fn parse_markers(raw: &str) -> Vec<RawLeaveMarker> {
    raw.split(';')
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .map(|chunk| match chunk.parse::<i64>() {
            Ok(n) => RawLeaveMarker::Number(n),
            Err(_) => RawLeaveMarker::Text(chunk.to_string()),
        })
        .collect()
}

/// CSV de la grille: header `shift,<date>...`, une ligne par garde, noms
/// joints par `"; "`.
pub fn grid_to_csv_string(grid: &ScheduleGrid) -> anyhow::Result<String> {
    let mut w = WriterBuilder::new().has_headers(false).from_writer(Vec::new());
    write_grid(&mut w, grid)?;
    let bytes = w.into_inner().map_err(|e| anyhow::anyhow!("flushing csv: {}", e.error()))?;
    String::from_utf8(bytes).context("csv output is not utf-8")
}

pub fn export_grid_csv<P: AsRef<Path>>(path: P, grid: &ScheduleGrid) -> anyhow::Result<()> {
    let path = path.as_ref();
    let mut w = WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    write_grid(&mut w, grid)?;
    w.flush()?;
    Ok(())
}

fn write_grid<W: std::io::Write>(w: &mut csv::Writer<W>, grid: &ScheduleGrid) -> anyhow::Result<()> {
    let mut header = vec!["shift".to_string()];
    header.extend(grid.dates.iter().map(|d| format_date(*d)));
    w.write_record(&header)?;
    for row in &grid.rows {
        let mut record = vec![row.slot.label()];
        record.extend(row.cells.iter().map(|names| names.join("; ")));
        w.write_record(&record)?;
    }
    Ok(())
}
