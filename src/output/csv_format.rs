//! CSV export with header `ip,port,service,banner`.

use crate::aggregator::ResultSet;
use crate::error::ExportResult;
use std::io::Write;

/// Column header, always written even for an empty result set.
pub const CSV_HEADER: [&str; 4] = ["ip", "port", "service", "banner"];

/// Write results as CSV. Banners containing commas, quotes, or newlines are
/// quoted by the csv writer.
pub fn write_csv<W: Write>(results: &ResultSet, writer: W) -> ExportResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    wtr.write_record(CSV_HEADER)?;
    for result in results {
        wtr.write_record([
            result.ip.as_str(),
            &result.port.to_string(),
            &result.service,
            &result.banner,
        ])?;
    }

    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::ScanResult;

    fn render(results: &ResultSet) -> String {
        let mut buf = Vec::new();
        write_csv(results, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_header_only_when_empty() {
        assert_eq!(render(&ResultSet::default()), "ip,port,service,banner\n");
    }

    #[test]
    fn test_banner_quoting() {
        let results = ResultSet::from(vec![
            ScanResult::new("127.0.0.1", 7, "Unknown", ""),
            ScanResult::new("127.0.0.1", 25, "SMTP", "220 a, b"),
        ]);
        assert_eq!(
            render(&results),
            "ip,port,service,banner\n127.0.0.1,7,Unknown,\n127.0.0.1,25,SMTP,\"220 a, b\"\n"
        );
    }

    #[test]
    fn test_reads_back_with_csv_reader() {
        let banner = "line one\nline \"two\"";
        let results = ResultSet::from(vec![ScanResult::new("10.0.0.1", 2222, "SSH", banner)]);
        let text = render(&results);

        let mut rdr = csv::Reader::from_reader(text.as_bytes());
        let rows: Vec<csv::StringRecord> = rdr.records().map(Result::unwrap).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][3], banner);
    }
}
