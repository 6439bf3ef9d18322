pub mod analyser;
pub mod capture;
pub mod fft;
