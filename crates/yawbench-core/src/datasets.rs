//! Static catalog of the public Zenodo SCADA datasets the benchmark runs on.

/// Build-time description of one wind farm's source files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetSpecification {
    pub site_name: &'static str,
    pub zenodo_record_url: &'static str,
    pub kmz_filename: &'static str,
    pub scada_archive_filenames: &'static [&'static str],
}

// Initially only a subset of the published SCADA years is included.
pub const DATASETS: &[DatasetSpecification] = &[
    DatasetSpecification {
        site_name: "Kelmarsh",
        zenodo_record_url: "https://zenodo.org/records/8252025",
        kmz_filename: "Kelmarsh_12.3MW_6xSenvion_MM92.kmz",
        scada_archive_filenames: &["Kelmarsh_SCADA_2022_4457.zip"],
    },
    DatasetSpecification {
        site_name: "Penmanshiel",
        zenodo_record_url: "https://zenodo.org/records/5946808",
        kmz_filename: "Penmanshiel_28.7MW_14xSenvion_MM82.kmz",
        scada_archive_filenames: &[
            "Penmanshiel_SCADA_2021_WT01-10_3108.zip",
            "Penmanshiel_SCADA_2021_WT11-15_3108.zip",
        ],
    },
];

/// Direct-download URL for one file inside a Zenodo record.
pub fn zenodo_file_url(zenodo_record_url: &str, filename: &str) -> String {
    format!("{zenodo_record_url}/files/{filename}?download=1")
}
