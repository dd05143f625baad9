//! Integration tests for reading simulation result files

use rstest::{fixture, rstest};
use xtools_deck::{Deck, ModelFamily, Models};
use xtools_results::*;
use xtools_schema::{LEGACY_VERSION, VERSION_1_5_2};

fn lines(path: &str) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(String::from)
        .collect()
}

/// Lines with the block `[start, end)` moved to just before line `to`
fn moved(dump: &[String], start: usize, end: usize, to: usize) -> Vec<String> {
    let mut lines = dump.to_vec();
    let block = lines.drain(start..end).collect::<Vec<String>>();
    let to = if to > start { to - block.len() } else { to };
    lines.splice(to..to, block);
    lines
}

#[fixture]
fn dump() -> Vec<String> {
    lines("./data/AlMgBulk5keV_version_1_5_2.txt")
}

#[fixture]
fn results() -> SimulationResults {
    read_results("./data/AlMgBulk5keV_version_1_5_2.txt").unwrap()
}

#[rstest]
#[case(tags::GEOMETRY_START, 0)]
#[case(tags::GEOMETRY_VOLUME, 3)]
#[case(tags::GEOMETRY_END, 8)]
fn geometry_tags(dump: Vec<String>, #[case] tag: &str, #[case] expected: usize) {
    assert_eq!(find_tag(tag, &dump).unwrap(), expected);
}

#[rstest]
fn missing_tag(dump: Vec<String>) {
    let geometry = &dump[..9];
    match find_tag(tags::BEAM, geometry) {
        Err(Error::TagNotFound { tag }) => assert_eq!(tag, tags::BEAM),
        other => panic!("unexpected {other:?}"),
    }
}

#[rstest]
fn every_region_tag(dump: Vec<String>) {
    let spectra = find_all_tags(tags::REGION, &dump, Some(tags::SPECTRUM));
    assert_eq!(spectra.len(), 1);
    assert_eq!(dump[spectra[0]], "Region 0 spectrum");

    assert!(find_all_tags("Not a tag", &dump, None).is_empty());
}

#[rstest]
fn beam_and_detector(results: SimulationResults) {
    assert_eq!(results.version, VERSION_1_5_2);
    assert_eq!(results.beam.incident_energy_kev, 5.0);
    assert_eq!(results.beam.current_a, 1.0e-10);
    assert_eq!(results.beam.acquisition_time_s, 100.0);

    assert_eq!(results.detector.crystal, "Si");
    assert_eq!(results.detector.take_off_angle_deg, 40.0);
    assert_eq!(results.detector.azimuthal_angle_deg, Some(0.0));
    assert_eq!(results.detector.number_channels, 4);
}

#[rstest]
fn electrons_and_models(results: SimulationResults) {
    assert_eq!(results.electrons.simulated, 1000);
    assert_eq!(results.electrons.backscattered_coefficient, 0.152);
    assert_eq!(results.electrons.skirted, Some(0));
    assert_eq!(results.electrons.internal, 848);

    assert_eq!(results.models, Models::new(VERSION_1_5_2));
}

#[rstest]
fn simulated_spectra(results: SimulationResults) {
    let spectra = results.spectra.unwrap();
    assert_eq!(spectra.regions.len(), 1);

    let region = &spectra.regions[0];
    assert_eq!(region.spectrum.columns.len(), 4);
    assert_eq!(region.spectrum.x(), vec![0.005, 0.010, 0.015, 0.020]);
    assert_eq!(region.elements.len(), 2);
    assert_eq!(
        region.element("mg").unwrap().column("Characteristic"),
        Some(vec![0.0, 0.2, 0.2, 0.0])
    );
    assert!(region.element("Cu").is_none());
}

#[rstest]
fn phirhoz_regions(results: SimulationResults) {
    let phirhoz = results.phirhoz.unwrap();
    let region = &phirhoz.regions[0];

    assert_eq!(region.index, 0);
    assert_eq!(region.volume, Skipped(5));
    assert_eq!(region.distribution, Skipped(4));
    assert_eq!(region.elements.len(), 2);
    assert_eq!(region.background_generated.len(), 2);
    assert_eq!(region.background_emitted[1].intensity, 1.4e-3);

    assert_eq!(region.curves.len(), 2);
    let curve = region.curve("Al", Shell::K).unwrap();
    assert_eq!(curve.depths, vec![0.0, 2.0e-5, 4.0e-5]);
    assert_eq!(curve.generated, vec![1.0, 1.4, 0.6]);
    assert!(region.curve("Al", Shell::L).is_none());
}

#[rstest]
fn eds_peaks_repeat_by_count(results: SimulationResults) {
    let eds = results.eds.unwrap();
    assert_eq!(eds.number_channels, 4);

    let reference = eds.reference.unwrap();
    assert_eq!(reference.channel_energies_kev.len(), 4);
    assert_eq!(reference.peaks.len(), 5);
    assert_eq!(reference.peaks[4].line, "Ll");

    let region = &eds.regions[0];
    assert_eq!(region.peak_intensities.len(), 5);
    assert_eq!(region.peak_intensities[0].intensity, 1520.5);
    assert_eq!(region.e_net.len(), 5);
    assert!(region.e_net.iter().all(|series| series.len() == region.i_out.len()));
}

#[rstest]
fn eds_region_on_its_own(dump: Vec<String>) {
    let eds = find_tag(tags::EDS, &dump).unwrap();
    let offset = eds + find_tag("Region 0", &dump[eds..]).unwrap();
    let (region, consumed) = RegionEds::read_from_lines(&dump[offset..], VERSION_1_5_2).unwrap();
    assert_eq!(region.index, 0);
    assert_eq!(region.e_net.len(), 5);
    assert_eq!(offset + consumed, dump.len());
}

#[rstest]
fn test_input_is_not_supported() {
    let result = read_results("./data/test_input_eds.txt");
    assert!(matches!(result, Err(Error::TagNotFound { .. })));

    let lines = lines("./data/test_input_eds.txt");
    let result = SpectraEds::read_from_lines(&lines[2..], VERSION_1_5_2);
    assert!(matches!(result, Err(Error::NotImplemented(_))));
}

#[rstest]
fn skipped_sections() {
    let mut reader = ResultsReader::new();
    reader.skip_spectra();
    reader.skip_phirhoz();
    reader.skip_eds();

    let results = reader.parse("./data/AlMgBulk5keV_version_1_5_2.txt").unwrap();
    assert!(results.spectra.is_none());
    assert!(results.phirhoz.is_none());
    assert!(results.eds.is_none());
    assert_eq!(results.beam.incident_energy_kev, 5.0);
}

#[rstest]
#[case(tags::BEAM, tags::DETECTOR, tags::SPECTRA, tags::DETECTOR)]
#[case(tags::PHIRHOZ, tags::EDS, tags::SPECTRA, tags::PHIRHOZ)]
fn sections_in_file_order(
    dump: Vec<String>,
    #[case] block: &str,
    #[case] next: &str,
    #[case] before: &str,
    #[case] missing: &str,
) {
    let start = find_tag(block, &dump).unwrap();
    let end = find_tag(next, &dump).unwrap();
    let to = find_tag(before, &dump).unwrap();
    let reordered = moved(&dump, start, end, to);
    assert_eq!(reordered.len(), dump.len());

    match ResultsReader::new().read_lines(&reordered) {
        Err(Error::TagNotFound { tag }) => assert_eq!(tag, missing),
        other => panic!("unexpected {other:?}"),
    }
}

#[rstest]
fn legacy_results() {
    let results = read_results("./data/legacy_no_version.txt").unwrap();
    assert_eq!(results.version, LEGACY_VERSION);
    assert_eq!(results.beam.incident_energy_kev, 30.0);
    assert_eq!(results.detector.azimuthal_angle_deg, None);
    assert_eq!(results.electrons.skirted, None);

    let models = results.models;
    assert_eq!(models.choices().len(), 8);
    assert_eq!(models.get(ModelFamily::AtomEnergyLoss).unwrap().code(), 1);
    assert_eq!(models.get(ModelFamily::XrayCsCharacteristic).unwrap().code(), 2);
    assert!(models.get(ModelFamily::AtomMac).is_none());

    assert!(results.spectra.is_none());
    assert!(results.phirhoz.is_none());
    assert!(results.eds.is_none());
}

#[rstest]
fn json_export(results: SimulationResults) {
    let directory = tempfile::tempdir().unwrap();
    let path = directory.path().join("AlMgBulk5keV.json");

    results.write_json(&path).unwrap();
    assert_eq!(SimulationResults::read_json(&path).unwrap(), results);
}

#[rstest]
fn csv_spectrum(results: SimulationResults) {
    let table = Table::read_csv("./data/AlMgBulk5keV_region_0.csv").unwrap();
    assert_eq!(table, results.spectra.unwrap().regions[0].spectrum);

    let rows = table
        .rows()
        .filter(|row| row.get("Characteristic") > Some(0.0))
        .filter_map(|row| row.x())
        .collect::<Vec<f64>>();
    assert_eq!(rows, vec![0.010, 0.015]);

    let directory = tempfile::tempdir().unwrap();
    let path = directory.path().join("region_0.csv");
    table.write_csv(&path).unwrap();
    assert_eq!(Table::read_csv(&path).unwrap(), table);
}
