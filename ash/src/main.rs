use std::process::ExitCode;

fn main() -> ExitCode {
    ash::lib_main()
}
