pub mod apply_kernel;
pub mod box_blur;
pub mod gaussian_blur;
pub mod io;
pub mod kernel;
pub mod laplacian;
pub mod sampling;
pub mod scale;
