use clap::Parser;
use colored::Colorize;
use kdramadl::{Args, Logger, Prompts, Settings};
use log::Level;
use std::{fmt, process};

fn error(message: impl fmt::Display) {
    eprintln!("{}: {}", "error".bold().red(), message);
}

fn run(settings: &Settings, prompts: &Prompts) -> i32 {
    if settings.no_color {
        colored::control::set_override(false);
    }

    let logger = match Logger::new(settings.verbose, settings.log_file.as_deref()) {
        Ok(x) => x,
        Err(e) => {
            error(format_args!("Unable to open log file: {}", e));
            return 1;
        }
    };

    println!("{}", kdramadl::header());

    match kdramadl::download(settings, prompts, &logger) {
        Ok(_) => 0,
        Err(e) => {
            logger.to_file(Level::Error, &e);
            error(e);
            1
        }
    }
}

fn main() {
    let args = Args::parse();
    let mut auto_quit = args.auto_quit;
    let mut prompts = Prompts {
        raw: args.raw_prompts,
    };

    let code = match args.settings() {
        Ok(settings) => {
            auto_quit = settings.auto_quit;
            prompts.raw = settings.raw_prompts;
            run(&settings, &prompts)
        }
        Err(e) => {
            error(format_args!("{:#}", e));
            1
        }
    };

    if !auto_quit {
        prompts.pause();
    }

    process::exit(code);
}
