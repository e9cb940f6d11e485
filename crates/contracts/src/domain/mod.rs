pub mod a001_process;
