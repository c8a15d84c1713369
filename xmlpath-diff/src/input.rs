use std::path::Path;

/// Inputs from `inputs` that are not present on disk, in argument order.
pub fn missing_inputs<'a>(inputs: &[&'a Path]) -> Vec<&'a Path> {
    inputs
        .iter()
        .copied()
        .filter(|path| !path.is_file())
        .collect()
}
