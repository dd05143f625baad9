//! Integration tests for reading and writing parameter decks

use rstest::{fixture, rstest};
use xtools_deck::*;
use xtools_schema::{
    Artifact, SchemaVersion, ALL_VERSIONS, LEGACY_VERSION, VERSION_1_1_1, VERSION_1_2_0,
    VERSION_1_2_2, VERSION_1_2_3, VERSION_1_2_5, VERSION_1_4_0, VERSION_1_4_1, VERSION_1_4_2,
    VERSION_1_5_2,
};

fn round_trip<D: Deck + std::fmt::Debug + PartialEq>(version: SchemaVersion) {
    let deck = D::new(version);
    let text = deck.to_text().unwrap();
    let lines = text.lines().collect::<Vec<&str>>();

    let read = D::from_lines(&lines).unwrap();
    assert_eq!(read.version(), version);
    assert_eq!(read.to_text().unwrap(), text, "{} {version}", D::TITLE);
}

/// Keys may only be added as the schema moves on
fn only_gains_keys(keys: impl Fn(SchemaVersion) -> Vec<&'static str>) {
    for pair in ALL_VERSIONS.windows(2) {
        let (old, new) = (keys(pair[0]), keys(pair[1]));
        assert!(old.iter().all(|key| new.contains(key)), "{} -> {}", pair[0], pair[1]);
    }
}

/// A key is listed exactly when its gate admits the version, and only
/// appears or disappears at the gate threshold
fn keys_follow_gates<D: Deck>() {
    for field in D::FIELDS {
        let listed = |version| D::applicable_keys(version).contains(&field.key);

        for version in ALL_VERSIONS {
            assert_eq!(
                listed(version),
                field.gate.admits(version),
                "{} {} {version}",
                D::TITLE,
                field.key
            );
        }

        for pair in ALL_VERSIONS.windows(2) {
            if listed(pair[0]) != listed(pair[1]) {
                assert_eq!(field.gate.threshold(), Some(pair[1]), "{} {}", D::TITLE, field.key);
            }
        }

        if let Some(threshold) = field.gate.threshold() {
            assert!(ALL_VERSIONS.contains(&threshold), "{} {}", D::TITLE, field.key);
        }
    }
}

#[fixture]
fn microscope() -> Microscope {
    Microscope::from_file("./data/AlMgBulk5keV_version_1_4_1.mic").unwrap()
}

#[rstest]
fn round_trip_every_version() {
    for version in ALL_VERSIONS {
        round_trip::<Microscope>(version);
        round_trip::<Models>(version);
        round_trip::<SimulationParameters>(version);
        round_trip::<SimulationInputs>(version);
        if Artifact::Results.gate().admits(version) {
            round_trip::<ResultsParameters>(version);
        }
    }
}

#[rstest]
fn key_sets_are_monotone() {
    only_gains_keys(Models::applicable_keys);
    only_gains_keys(ResultsParameters::applicable_keys);
    only_gains_keys(SimulationInputs::applicable_keys);
}

#[rstest]
fn keys_follow_their_gates() {
    keys_follow_gates::<Microscope>();
    keys_follow_gates::<Models>();
    keys_follow_gates::<SimulationParameters>();
    keys_follow_gates::<ResultsParameters>();
    keys_follow_gates::<SimulationInputs>();
}

#[rstest]
fn key_sets_are_deterministic() {
    for version in ALL_VERSIONS {
        let keys = Microscope::applicable_keys(version);
        assert_eq!(keys, Microscope::applicable_keys(version));
        assert!(keys.contains(&"DetectorPitch") != keys.contains(&"DetectorAzimuthalAngle"));
    }
}

#[rstest]
#[case(VERSION_1_1_1, 8)]
#[case(VERSION_1_2_0, 10)]
#[case(VERSION_1_2_2, 11)]
#[case(VERSION_1_4_2, 12)]
#[case(VERSION_1_5_2, 12)]
fn model_keys_per_version(#[case] version: SchemaVersion, #[case] expected: usize) {
    assert_eq!(Models::applicable_keys(version).len(), expected);
}

#[rstest]
fn read_microscope(microscope: Microscope) {
    assert_eq!(microscope.version, VERSION_1_4_1);
    assert_eq!(microscope.beam_energy_kev, 5.0);
    assert_eq!(microscope.beam_current_a, 1.0e-10);
    assert_eq!(microscope.detector_crystal_atom, "Si");
    assert_eq!(microscope.detector_take_off_angle_deg, 40.0);
    assert_eq!(microscope.detector_azimuthal_angle_deg, Some(0.0));
    assert_eq!(microscope.detector_pitch_deg, None);
    assert_eq!(microscope.time_s, 100.0);
}

/// Bytes written back for a deck file
fn rewritten<D: Deck>(path: &str) -> Vec<u8> {
    let mut written = Vec::new();
    D::from_file(path).unwrap().write_to(&mut written).unwrap();
    written
}

#[rstest]
#[case("./data/AlMgBulk5keV_version_1_4_1.mic")]
#[case("./data/AlMgBulk5keV_version_1_1_1.mdl")]
#[case("./data/AlMgBulk5keV_version_1_2_5.mdl")]
#[case("./data/AlMgBulk5keV_version_1_5_2.mdl")]
#[case("./data/AlMgBulk5keV_version_1_1_1.par")]
#[case("./data/AlMgBulk5keV_version_1_5_2.par")]
#[case("./data/AlMgBulk5keV_version_1_4_4.rp")]
#[case("./data/AlMgBulk5keV_version_1_5_1.rp")]
#[case("./data/AlMgBulk5keV_version_1_2_5.sim")]
#[case("./data/AlMgBulk5keV_version_1_5_2.sim")]
fn byte_exact_files(#[case] path: &str) {
    let expected = std::fs::read(path).unwrap();

    let written = match path.rsplit('.').next().unwrap() {
        SIM_EXTENSION => rewritten::<SimulationInputs>(path),
        extension => match Artifact::from_extension(extension).unwrap() {
            Artifact::Microscope => rewritten::<Microscope>(path),
            Artifact::Model => rewritten::<Models>(path),
            Artifact::Parameters => rewritten::<SimulationParameters>(path),
            Artifact::Results => rewritten::<ResultsParameters>(path),
            other => panic!("no fixture for {other}"),
        },
    };

    assert_eq!(String::from_utf8(written).unwrap(), String::from_utf8(expected).unwrap());
}

#[rstest]
fn scientific_and_flag_values() {
    let parameters = SimulationParameters::from_file("./data/AlMgBulk5keV_version_1_5_2.par").unwrap();
    assert_eq!(parameters.voxel_simplification, Some(true));
    assert_eq!(parameters.elastic_cross_section_scaling_factor, Some(0.95));
    assert_eq!(parameters.energy_loss_scaling_factor, Some(1.25));
    assert_eq!(parameters.number_repetitions, Some(4));

    let flags = ResultsParameters::from_file("./data/AlMgBulk5keV_version_1_4_4.rp").unwrap();
    assert!(!flags.compute_xray_bremsstrahlung);
    assert_eq!(flags.export_partial_spectra, Some(true));
    assert_eq!(flags.export_eds_spectra, None);

    let inputs = SimulationInputs::from_file("./data/AlMgBulk5keV_version_1_2_5.sim").unwrap();
    assert_eq!(inputs.version, VERSION_1_2_5);
    assert_eq!(inputs.results, None);
}

#[rstest]
fn write_to_disk(microscope: Microscope) {
    let directory = tempfile::tempdir().unwrap();
    let path = directory.path().join(Artifact::Microscope.file_name("copy"));

    microscope.write(&path).unwrap();
    let copy = Microscope::from_file(&path).unwrap();
    assert_eq!(copy, microscope);
}

#[rstest]
fn crlf_models() {
    let models = Models::from_file("./data/AlMgBulk5keV_version_1_2_5.mdl").unwrap();
    assert_eq!(models.version, VERSION_1_2_5);
    assert_eq!(models.xray_cs_bremsstrahlung.name(), "Ding 2002");
    assert_eq!(models.atom_energy_loss.name(), "Bethe relativistic");
    assert_eq!(models.atom_mac.map(|m| m.code()), Some(1));
    assert_eq!(models.sample_energy_loss, None);
    assert!(models.to_text().unwrap().contains("\r\n"));
}

#[rstest]
fn legacy_parameters() {
    let parameters = SimulationParameters::from_file("./data/legacy_no_version.par").unwrap();
    assert_eq!(parameters.version, LEGACY_VERSION);
    assert_eq!(parameters.base_filename, "Results\\AlMgBulk5keV");
    assert_eq!(parameters.base_name(), "AlMgBulk5keV");
    assert_eq!(parameters.number_electrons, 2500);
    assert_eq!(parameters.energy_channel_width_ev, Some(10.0));
    assert_eq!(parameters.spectra_interpolation_model, None);

    let text = parameters.to_text().unwrap();
    assert!(text.contains("Version=1.1.1\r\n"));
    assert!(text.contains("EnergyChannelWidth=10.0\r\n"));
}

#[rstest]
fn parse_error_keeps_context() {
    let error = Microscope::from_file("./data/bad_beam_energy.mic").unwrap_err();
    match error {
        Error::ParseError { field, raw_value } => {
            assert_eq!(field, "BeamEnergy");
            assert_eq!(raw_value, "five keV");
        }
        e => panic!("unexpected error {e:?}"),
    }
}

#[rstest]
fn missing_field_on_upgrade() {
    let mut microscope = Microscope::new(VERSION_1_1_1);
    microscope.set_version(VERSION_1_5_2);

    let result = microscope.to_text();
    assert!(matches!(result, Err(Error::MissingField { key }) if key == "BeamTilt"));

    // nothing is created for an incomplete record
    let directory = tempfile::tempdir().unwrap();
    let path = directory.path().join("incomplete.mic");
    assert!(microscope.write(&path).is_err());
    assert!(!path.exists());
}

#[rstest]
fn downgrade_drops_keys() {
    let mut microscope = Microscope::new(VERSION_1_5_2);
    microscope.set_version(VERSION_1_2_0);
    microscope.detector_pitch_deg = Some(12.5);

    let text = microscope.to_text().unwrap();
    assert!(text.contains("DetectorPitch=12.50\r\n"));
    assert!(!text.contains("DetectorAzimuthalAngle"));
    assert!(!text.contains("BeamStandardDeviation"));
}

#[rstest]
fn results_parameters_need_1_4_0() {
    let parameters = ResultsParameters::new(VERSION_1_2_5);
    assert!(matches!(
        parameters.to_text(),
        Err(Error::ArtifactNotAvailable {
            artifact: Artifact::Results,
            ..
        })
    ));
}

#[rstest]
#[case(HeaderStyle::Legacy, VERSION_1_1_1)]
#[case(HeaderStyle::Standard, VERSION_1_2_3)]
#[case(HeaderStyle::Documented, VERSION_1_4_0)]
fn header_follows_version(#[case] style: HeaderStyle, #[case] version: SchemaVersion) {
    let text = Models::new(version).to_text().unwrap();
    let eol = LineEnding::for_version(version).as_str();
    let header = style.lines(Models::TITLE).join(eol);
    assert!(text.starts_with(&header));
}

#[rstest]
fn simulation_inputs_list_artifacts() {
    let inputs = SimulationInputs::with_base_name("AlMgBulk5keV", VERSION_1_5_2);
    let text = inputs.to_text().unwrap();
    assert!(text.contains("\nSpecimen=AlMgBulk5keV.sam\n"));
    assert!(text.contains("\nResultParameters=AlMgBulk5keV.rp\n"));
    assert_eq!(inputs.file_name(Artifact::Snr), Some("AlMgBulk5keV.snp"));
}
