use argh::FromArgs;
use shell_dispatch::{Context, Shell, builtin};

#[derive(FromArgs)]
/// Interactive demo shell. With WORDS, hand them to the default handler once and exit.
struct Args {
    #[argh(option)]
    /// prompt shown before each line
    prompt: Option<String>,

    #[argh(option)]
    /// file to persist history in
    history: Option<String>,

    #[argh(option)]
    /// history file relative to the home directory
    home_history: Option<String>,

    #[argh(positional, greedy)]
    /// words to process without reading from the terminal
    words: Vec<String>,
}

fn unknown_command(ctx: &Context<'_>) {
    println!("unknown command: {:?} (try `help`)", ctx.args()[0]);
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Args = argh::from_env();

    let mut sh = Shell::new();
    builtin::register(&mut sh);
    sh.set_handler(unknown_command);

    if let Some(prompt) = args.prompt {
        sh.set_prompt(prompt);
    }
    if let Some(path) = args.home_history {
        sh.set_home_history_file(path);
    }
    if let Some(path) = args.history {
        sh.set_history_file(path);
    }

    if !args.words.is_empty() {
        sh.process(args.words);
        return;
    }

    sh.run();
}
