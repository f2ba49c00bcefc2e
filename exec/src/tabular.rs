use std::fs;
use std::path::{ Path, PathBuf };
use csv;
use itertools::Itertools;
use prettytable::Table;
use smatch::prelude::*;

use errors::*;

pub const PRECISION_COLUMN: &str = "smatch_precision";
pub const RECALL_COLUMN: &str = "smatch_recall";
pub const F1_COLUMN: &str = "smatch_f_score";

/// Rows of a table with a candidate column and a reference column
pub struct AmrTable {
    pub headers: csv::StringRecord,
    pub records: Vec<csv::StringRecord>,
    cand_idx: usize,
    ref_idx: usize,
}

impl AmrTable {
    pub fn from_file(fpath: &Path, cand_column: &str, ref_column: &str) -> Result<AmrTable> {
        let mut reader = csv::Reader::from_path(fpath).chain_err(|| format!("Cannot read table: {:?}", fpath))?;
        let headers = reader.headers()?.clone();
        let find_column = |name: &str| -> Result<usize> {
            match headers.iter().position(|h| h == name) {
                Some(idx) => Ok(idx),
                None => Err(ErrorKind::Smatch(::smatch::errors::ErrorKind::MissingColumn(name.to_owned())).into())
            }
        };

        let cand_idx = find_column(cand_column)?;
        let ref_idx = find_column(ref_column)?;
        let records = reader.records().collect::<::std::result::Result<Vec<_>, _>>()?;

        Ok(AmrTable { headers, records, cand_idx, ref_idx })
    }

    /// Cells that hold no AMR text (empty, NaN, numbers) are returned as empty entries
    pub fn get_entries(&self) -> (Vec<String>, Vec<String>) {
        let column = |idx: usize| self.records.iter()
            .map(|r| text_cell(r.get(idx).unwrap_or("")).to_owned())
            .collect::<Vec<_>>();

        (column(self.cand_idx), column(self.ref_idx))
    }

    /// Write the table back with the precision, recall and f1 of every row appended
    pub fn write_with_scores(&self, fpath: &Path, items: &[ItemScore]) -> Result<()> {
        let mut writer = csv::Writer::from_path(fpath).chain_err(|| format!("Cannot write table: {:?}", fpath))?;
        let mut headers = self.headers.clone();
        headers.push_field(PRECISION_COLUMN);
        headers.push_field(RECALL_COLUMN);
        headers.push_field(F1_COLUMN);
        writer.write_record(&headers)?;

        for (record, item) in self.records.iter().zip(items.iter()) {
            let mut record = record.clone();
            record.push_field(&item.score.precision.to_string());
            record.push_field(&item.score.recall.to_string());
            record.push_field(&item.score.f1.to_string());
            writer.write_record(&record)?;
        }

        writer.flush()?;
        Ok(())
    }
}

/// Score every row of a table and write the augmented table
pub fn score_table(driver: &BatchDriver, finput: &Path, foutput: &Path) -> Result<BatchReport> {
    let batch_conf = &driver.settings().batch;
    let table = AmrTable::from_file(finput, &batch_conf.cand_column, &batch_conf.ref_column)?;
    let (cands, refs) = table.get_entries();

    let report = driver.run(&cands, &refs)?;
    table.write_with_scores(foutput, &report.items)?;
    info!("Write {} scored rows to {:?}", report.items.len(), foutput);

    Ok(report)
}

pub fn output_file_name(finput: &Path, segmentation: Segmentation) -> String {
    let stem = finput.file_stem().map_or("".into(), |s| s.to_string_lossy());
    match segmentation {
        Segmentation::Sentences => format!("{}_amr_score_splitted.csv", stem),
        Segmentation::Whole => format!("{}_amr_score_single_str.csv", stem),
    }
}

/// Score every csv table of a directory, one output table per input table
pub fn score_dir(driver: &BatchDriver, indir: &Path, outdir: &Path) -> Result<Vec<(PathBuf, BatchReport)>> {
    fs::create_dir_all(outdir).chain_err(|| format!("Cannot create output directory: {:?}", outdir))?;

    let mut finputs = Vec::new();
    for entry in fs::read_dir(indir).chain_err(|| format!("Cannot list directory: {:?}", indir))? {
        let fpath = entry?.path();
        if fpath.is_file() && fpath.extension().map_or(false, |ext| ext == "csv") {
            finputs.push(fpath);
        }
    }

    let mut reports = Vec::new();
    for finput in finputs.into_iter().sorted() {
        let foutput = outdir.join(output_file_name(&finput, driver.settings().batch.segmentation));
        info!("Score {:?} into {:?}", finput, foutput);
        let report = score_table(driver, &finput, &foutput)?;
        reports.push((finput, report));
    }

    Ok(reports)
}

pub fn print_summary(reports: &[(PathBuf, BatchReport)]) {
    let mut table = Table::new();
    table.add_row(row!["source", "n_rows", "precision", "recall", "f1"]);
    for (fpath, report) in reports {
        let name = fpath.file_name().map_or("".into(), |s| s.to_string_lossy());
        table.add_row(row![name, report.items.len(),
            format!("{:.3}", report.overall.precision),
            format!("{:.3}", report.overall.recall),
            format!("{:.3}", report.overall.f1)]);
    }
    table.printstd();
}
