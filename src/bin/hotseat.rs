// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#[macro_use]
extern crate clap;
#[macro_use]
extern crate log;

use std::fs::File;
use std::io::{self, BufReader};
use std::process;

use clap::{App, Arg, ArgMatches, SubCommand};
use hotseat::history::HISTORY_ROWS;
use hotseat::{Board, BoardConfig, ConsoleSession, Input, Rules};

fn config_arg() -> Arg<'static, 'static> {
    Arg::with_name("config")
        .help("JSON board configuration")
        .value_name("FILE")
        .short("c")
        .long("config")
        .takes_value(true)
}

fn strict_arg() -> Arg<'static, 'static> {
    Arg::with_name("strict")
        .help("Reject moves that expose the mover's king and end the game on mate or stalemate")
        .long("strict")
}

fn main() {
    env_logger::init();
    let matches = App::new(crate_name!())
        .version(crate_version!())
        .author(crate_authors!())
        .about(crate_description!())
        .subcommand(
            SubCommand::with_name("play")
                .about("Play a game on the console")
                .arg(config_arg())
                .arg(strict_arg()),
        )
        .subcommand(
            SubCommand::with_name("replay")
                .about("Apply a JSON script of inputs and print the resulting game")
                .arg(
                    Arg::with_name("FILE")
                        .help("JSON array of inputs")
                        .required(true)
                        .index(1),
                )
                .arg(config_arg())
                .arg(strict_arg()),
        )
        .get_matches();

    if let Some(matches) = matches.subcommand_matches("replay") {
        run_replay(matches);
    }

    let board = match matches.subcommand_matches("play") {
        Some(matches) => load_board(matches),
        None => Board::from_start_position(),
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = ConsoleSession::new(board);
    if let Err(err) = session.run(stdin.lock(), stdout.lock()) {
        eprintln!("console error: {}", err);
        process::exit(1);
    }
}

fn load_board(matches: &ArgMatches) -> Board {
    let mut config = match matches.value_of("config") {
        Some(path) => match BoardConfig::from_path(path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("{}: {}", path, err);
                process::exit(1);
            }
        },
        None => BoardConfig::standard(),
    };

    if matches.is_present("strict") {
        config.rules = Rules::Strict;
    }

    debug!("starting from {:?}", config);
    match Board::new(&config) {
        Ok(board) => board,
        Err(err) => {
            eprintln!("invalid board: {}", err);
            process::exit(1);
        }
    }
}

fn run_replay(matches: &ArgMatches) -> ! {
    let path = matches.value_of("FILE").unwrap();
    let inputs = match File::open(path).map(BufReader::new) {
        Ok(reader) => match Input::read_script(reader) {
            Ok(inputs) => inputs,
            Err(err) => {
                eprintln!("{}: {}", path, err);
                process::exit(1);
            }
        },
        Err(err) => {
            eprintln!("{}: {}", path, err);
            process::exit(1);
        }
    };

    let mut board = load_board(matches);
    for (i, action) in board.replay(inputs).into_iter().enumerate() {
        debug!("input {}: {:?}", i, action);
    }

    println!("{}", board);
    println!("status: {:?}", board.status());
    println!("to move: {}", board.turn());
    for row in board.history_rows(HISTORY_ROWS) {
        match row.second {
            Some(second) => println!("{:>3}. {:<10} {}", row.number, row.first, second),
            None => println!("{:>3}. {}", row.number, row.first),
        }
    }

    process::exit(0);
}
