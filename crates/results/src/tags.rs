//! Every literal the result file is navigated by
//!
//! Section tags are matched against the start of a trimmed line. Field labels
//! are matched against the text before the `=`, `:` or ` is ` separator.

// ! Geometry summary, never parsed but useful for navigation
pub const GEOMETRY_START: &str = "##### Geometry Setup Start #####";
pub const GEOMETRY_VOLUME: &str = "--- Volume";
pub const GEOMETRY_END: &str = "##### Geometry Setup End #####";

// ! Top level sections
pub const BEAM: &str = "Beam Parameters:";
pub const DETECTOR: &str = "Detector Parameters:";
pub const ELECTRON: &str = "Electron Results:";
pub const MODELS: &str = "Model Parameters:";
pub const SPECTRA: &str = "Simulated Spectra:";
pub const PHIRHOZ: &str = "Phi-rho-z:";
pub const EDS: &str = "EDS Spectra:";

// ! Counts shared by several sections
pub const NUMBER_OF_REGIONS: &str = "Number of regions";
pub const NUMBER_OF_ELEMENTS: &str = "Number of elements";

// ! Beam parameters
pub const INCIDENT_ENERGY: &str = "Electron incident energy";
pub const BEAM_CURRENT: &str = "Beam current";
pub const ACQUISITION_TIME: &str = "Acquisition time";
pub const BEAM_DIAMETER: &str = "Beam diameter";
pub const BEAM_TILT: &str = "Beam tilt";
pub const GAUSSIAN_MEAN: &str = "Gaussian mean";
pub const GAUSSIAN_SIGMA: &str = "Gaussian sigma";

// ! Detector parameters
pub const CRYSTAL: &str = "Crystal";
pub const CRYSTAL_DENSITY: &str = "Crystal Density";
pub const CRYSTAL_THICKNESS: &str = "Crystal Thickness";
pub const CRYSTAL_RADIUS: &str = "Crystal Radius";
pub const CRYSTAL_DISTANCE: &str = "Crystal Distance";
pub const DEAD_LAYER: &str = "Dead Layer";
pub const DIFFUSION_LENGTH: &str = "Diffusion Length";
pub const SURFACE_QUALITY: &str = "Surface Quality";
pub const NOISE: &str = "Noise";
pub const TAKE_OFF_ANGLE: &str = "Take-off Angle";
pub const AZIMUTHAL_ANGLE: &str = "Azimuthal Angle";
pub const NUMBER_OF_CHANNELS: &str = "Number of Channels";
pub const CHANNEL_WIDTH: &str = "Channel Width";

// ! Electron results
pub const ELECTRONS_SIMULATED: &str = "Electrons Simulated";
pub const BACKSCATTERED: &str = "Backscattered Electrons";
pub const BACKSCATTERED_COEFFICIENT: &str = "Backscattered Coefficient";
pub const TRANSMITTED: &str = "Transmitted Electrons";
pub const TRANSMITTED_COEFFICIENT: &str = "Transmitted Coefficient";
pub const SKIRTED: &str = "Skirted Electrons";
pub const INTERNAL: &str = "Internal Electrons";
pub const ABSORBED_ENERGY: &str = "Absorbed Energy";

/// Decoration closing the electron results
pub const ELECTRON_DECORATION_LINES: usize = 2;

// ! Simulated spectra
pub const REGION: &str = "Region";
pub const SPECTRUM: &str = "spectrum";
pub const REGION_NUMBER_OF_ELEMENTS: &str = "number of elements";
pub const ELEMENT_LIST: &str = "Elements:";
pub const ELEMENT: &str = "Element";

// ! Phi-rho-z distributions
pub const PHIRHOZ_REGION: &str = "Phi-rho-z for region";
pub const REGION_VOLUME: &str = "Region volume:";
pub const DISTRIBUTION: &str = "Distribution:";
pub const NUMBER_OF_WINDOWS: &str = "Number of energy windows";
pub const BACKGROUND_GENERATED: &str = "Background generated:";
pub const BACKGROUND_EMITTED: &str = "Background emitted:";
pub const PHIRHOZ_CURVE: &str = "Phi-rho-z curve";
pub const NUMBER_OF_DEPTH_BINS: &str = "Number of depth bins";

// ! EDS spectra
pub const NUMBER_OF_EDS_CHANNELS: &str = "Number of channels";
pub const TEST_INPUT: &str = "Test input:";
pub const REFERENCE_START: &str = "Partial spectra reference start";
pub const REFERENCE_PEAKS: &str = "Partial spectra reference peaks";
pub const REFERENCE_END: &str = "Partial spectra reference end";
pub const NUMBER_OF_PEAKS: &str = "Number of characteristic peaks in region";
pub const I_OUT: &str = "I_Out[channel]";
pub const I_BREM: &str = "I_Brem[channel]";
pub const P_I: &str = "P_I (char)";
pub const E_NET: &str = "E_Net[peak][channel]";
