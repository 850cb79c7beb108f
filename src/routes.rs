// Wizard paths and page element ids

pub const DEFINE_SHAPES_PREFIX: &str = "/define-shapes";
pub const UPLOAD_HYDRUS_PATH: &str = "/upload-hydrus";

/// Edit page (and POST target) of one model's shape
pub fn define_shapes_path(model_index: usize) -> String {
    format!("{}/{}", DEFINE_SHAPES_PREFIX, model_index)
}

/// The wizard has no known end; the server decides where the last model leads.
/// `None` only for an index with no successor.
pub fn next_model_path(model_index: usize) -> Option<String> {
    model_index.checked_add(1).map(define_shapes_path)
}

/// Step back to the previous model, or to the upload page from the first one
pub fn previous_model_path(model_index: usize) -> String {
    match model_index.checked_sub(1) {
        Some(previous) => define_shapes_path(previous),
        None => UPLOAD_HYDRUS_PATH.to_string(),
    }
}

pub fn cell_element_id(row: usize, col: usize) -> String {
    format!("cell_{}_{}", row, col)
}
