// Group definitions: one per category section of the styrenics overview sheet.
use crate::model::ProductProps;
use crate::utils::parse_num;
use regex::Regex;

/// One recognized sheet section: header pattern, target category and the
/// positional column mapping for its data rows.
pub struct GroupDef {
    pub category_name: &'static str,
    pub category_slug: &'static str,
    pub pattern: Regex,
    pub map_row: fn(&[String]) -> ProductProps,
}

fn cell(cols: &[String], idx: usize) -> &str {
    cols.get(idx).map(String::as_str).unwrap_or("")
}

fn text(cols: &[String], idx: usize) -> Option<String> {
    let v = cell(cols, idx).trim();
    if v.is_empty() { None } else { Some(v.to_string()) }
}

fn num(cols: &[String], idx: usize) -> Option<f64> {
    parse_num(cell(cols, idx))
}

fn map_abs(cols: &[String]) -> ProductProps {
    ProductProps {
        vicat_softening_temp: num(cols, 1),
        izod_impact: num(cols, 2),
        type_label: text(cols, 3),
        mfi220_10: num(cols, 4),
        main_applications: text(cols, 5),
        ..ProductProps::default()
    }
}

fn map_san(cols: &[String]) -> ProductProps {
    ProductProps {
        type_label: text(cols, 1),
        mfi220_10: num(cols, 2),
        charpy_impact: num(cols, 3),
        vicat_temp: num(cols, 4),
        main_applications: text(cols, 5),
        ..ProductProps::default()
    }
}

fn map_gpps_hips(cols: &[String]) -> ProductProps {
    ProductProps {
        mfi200_5: num(cols, 1),
        vicat_temp: num(cols, 2),
        izod_impact: num(cols, 3),
        type_label: text(cols, 4),
        main_applications: text(cols, 5),
        ..ProductProps::default()
    }
}

fn map_ps_pe(cols: &[String]) -> ProductProps {
    ProductProps {
        mfi200_5: num(cols, 1),
        izod_impact: num(cols, 2),
        vicat_a_temp: num(cols, 3),
        type_label: text(cols, 4),
        main_applications: text(cols, 5),
        ..ProductProps::default()
    }
}

fn map_pc_abs(cols: &[String]) -> ProductProps {
    ProductProps {
        mfi260_5: num(cols, 1),
        izod_impact: num(cols, 2),
        type_label: text(cols, 3),
        vicat_b120_temp: num(cols, 4),
        main_applications: text(cols, 5),
        ..ProductProps::default()
    }
}

fn map_eps(cols: &[String]) -> ProductProps {
    ProductProps {
        type_label: text(cols, 1),
        particle_size_range: text(cols, 2),
        blowing_agent: text(cols, 3),
        density_range: text(cols, 4),
        main_applications: text(cols, 5),
        ..ProductProps::default()
    }
}

/// The fixed ordered list of sheet sections. Order matters only for pattern
/// lookup; the first matching definition wins.
pub fn group_definitions() -> Vec<GroupDef> {
    vec![
        // ABS: Impressio® ABS, Sinkral®, Versalis Revive® ABS
        GroupDef {
            category_name: "ABS",
            category_slug: "abs",
            pattern: Regex::new(r"Styrenics / ABS /").unwrap(),
            map_row: map_abs,
        },
        // SAN: Kostil®
        GroupDef {
            category_name: "SAN",
            category_slug: "san",
            pattern: Regex::new(r"Styrenics / SAN /").unwrap(),
            map_row: map_san,
        },
        // GPPS-HIPS: Edistir®, Impressio® HIPS, Versalis Revive® PS
        GroupDef {
            category_name: "GPPS-HIPS",
            category_slug: "gpps-hips",
            pattern: Regex::new(r"Styrenics / GPPS-HIPS /").unwrap(),
            map_row: map_gpps_hips,
        },
        // PS-PE: Koblend® (PS-PE)
        GroupDef {
            category_name: "PS-PE",
            category_slug: "ps-pe",
            pattern: Regex::new(r"Styrenics / PS-PE /").unwrap(),
            map_row: map_ps_pe,
        },
        // PC-ABS: Koblend® (PC-ABS)
        GroupDef {
            category_name: "PC-ABS",
            category_slug: "pc-abs",
            pattern: Regex::new(r"Styrenics / PC-ABS /").unwrap(),
            map_row: map_pc_abs,
        },
        // EPS: Extir®, Versalis Revive® EPS; no trailing slash, the sheet
        // writes this header as "Styrenics / EPS & EPS MC / …"
        GroupDef {
            category_name: "EPS & EPS MC",
            category_slug: "eps",
            pattern: Regex::new(r"Styrenics / EPS").unwrap(),
            map_row: map_eps,
        },
    ]
}
