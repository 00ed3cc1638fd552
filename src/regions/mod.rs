use std::io::Write;

use comfy_table::{Cell, Table};

use crate::ocm::Region;

const HEADER: [&str; 3] = ["ID", "NAME", "MULTI-AZ SUPPORT"];
const COLUMN_GAP: u16 = 4;

/// Enabled regions, narrowed to the requested multi-AZ support when the
/// flag was given. Keeps the order the API returned.
pub fn filter_regions(regions: &[Region], multi_az: Option<bool>) -> Vec<&Region> {
    regions
        .iter()
        .filter(|region| region.enabled())
        .filter(|region| multi_az.is_none_or(|wanted| region.supports_multi_az() == wanted))
        .collect()
}

pub fn render_table(regions: &[&Region]) -> String {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::NOTHING);
    table.set_header(HEADER);
    table.add_rows(regions.iter().map(|region| {
        vec![
            Cell::new(region.id()),
            Cell::new(region.display_name()),
            Cell::new(region.supports_multi_az()),
        ]
    }));
    for column in table.column_iter_mut() {
        column.set_padding((0, COLUMN_GAP));
    }

    table
        .lines()
        .map(|line| line.trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn write_table<W: Write>(out: &mut W, regions: &[&Region]) -> std::io::Result<()> {
    writeln!(out, "{}", render_table(regions))?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Region> {
        vec![
            Region::new("us-east-1", "US East", true, true),
            Region::new("us-west-1", "US West", false, true),
            Region::new("eu-west-1", "EU West", true, false),
        ]
    }

    fn ids(regions: &[&Region]) -> Vec<String> {
        regions.iter().map(|region| region.id().to_string()).collect()
    }

    #[test]
    fn unset_flag_keeps_enabled_in_order() {
        let regions = sample();
        assert_eq!(ids(&filter_regions(&regions, None)), ["us-east-1", "eu-west-1"]);
    }

    #[test]
    fn multi_az_true_keeps_multi_az_only() {
        let regions = sample();
        assert_eq!(ids(&filter_regions(&regions, Some(true))), ["us-east-1"]);
    }

    #[test]
    fn multi_az_false_keeps_single_az_only() {
        let regions = sample();
        assert_eq!(ids(&filter_regions(&regions, Some(false))), ["eu-west-1"]);
    }

    #[test]
    fn disabled_regions_never_survive() {
        let regions = vec![
            Region::new("a", "A", false, true),
            Region::new("b", "B", false, false),
        ];
        for flag in [None, Some(true), Some(false)] {
            assert!(filter_regions(&regions, flag).is_empty());
        }
    }

    #[test]
    fn table_has_header_and_rows() {
        let regions = sample();
        let rendered = render_table(&filter_regions(&regions, None));
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0].split_whitespace().collect::<Vec<_>>(),
            ["ID", "NAME", "MULTI-AZ", "SUPPORT"]
        );
        assert_eq!(
            lines[1].split_whitespace().collect::<Vec<_>>(),
            ["us-east-1", "US", "East", "true"]
        );
        assert_eq!(
            lines[2].split_whitespace().collect::<Vec<_>>(),
            ["eu-west-1", "EU", "West", "false"]
        );
    }

    #[test]
    fn columns_are_aligned() {
        let regions = vec![
            Region::new("ap-southeast-1", "Asia Pacific, Singapore", true, true),
            Region::new("us-east-1", "US East", true, false),
        ];
        let rendered = render_table(&filter_regions(&regions, None));
        let lines: Vec<&str> = rendered.lines().collect();

        let name_column = lines[0].find("NAME").unwrap();
        assert_eq!(lines[1].find("Asia Pacific").unwrap(), name_column);
        assert_eq!(lines[2].find("US East").unwrap(), name_column);

        let multi_az_column = lines[0].find("MULTI-AZ SUPPORT").unwrap();
        assert_eq!(lines[1].find("true").unwrap(), multi_az_column);
        assert_eq!(lines[2].find("false").unwrap(), multi_az_column);
        assert!(name_column >= "ap-southeast-1".len() + 1);
        assert!(lines.iter().all(|line| !line.starts_with(' ')));
        assert!(lines.iter().all(|line| !line.ends_with(' ')));
    }

    #[test]
    fn empty_selection_prints_header_only() {
        let rendered = render_table(&[]);
        assert_eq!(rendered.lines().count(), 1);
        assert!(rendered.starts_with("ID"));
    }

    #[test]
    fn write_table_ends_with_newline() {
        let regions = sample();
        let mut out = Vec::new();
        write_table(&mut out, &filter_regions(&regions, Some(true))).unwrap();

        let written = String::from_utf8(out).unwrap();
        assert!(written.ends_with("true\n"));
        assert!(!written.contains("us-west-1"));
    }
}
