use clap::Args;
use quarantine_core::runner::run_with_custom_args;

#[derive(Args, Debug)]
struct Extra {
    #[arg(long, default_value = "")]
    label: String,
}

fn main() {
    run_with_custom_args(|_context, _args, extra: Option<Extra>| {
        if let Some(extra) = extra {
            println!("{}", extra.label);
        }
        Ok(())
    })
    .unwrap();
}
