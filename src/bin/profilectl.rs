use std::env;

use anyhow::{anyhow, bail, Context, Result};
use jworkspace_users::UserProfileEngine;

fn main() -> Result<()> {
    env_logger::init();
    let command = Command::parse(env::args().skip(1))?;
    let mut engine = UserProfileEngine::open()?;
    run(&mut engine, command)
}

enum Command {
    Add { name: String, password: String },
    Remove { name: String, password: String },
    List,
    Check { name: String, password: String },
    Show { name: String },
    SetParam { name: String, password: String, key: String, value: String },
    Rename { name: String, password: String, new_name: String },
    Passwd { name: String, old: String, new: String },
}

impl Command {
    fn parse(args: impl Iterator<Item = String>) -> Result<Self> {
        let args: Vec<String> = args.collect();
        let Some((command, rest)) = args.split_first() else {
            print_usage();
            std::process::exit(0);
        };
        let arg = |index: usize, what: &str| -> Result<String> {
            rest.get(index)
                .cloned()
                .with_context(|| format!("Expected {what} for '{command}'"))
        };
        let parsed = match command.as_str() {
            "add" => Self::Add {
                name: arg(0, "a user name")?,
                password: arg(1, "a password")?,
            },
            "remove" => Self::Remove {
                name: arg(0, "a user name")?,
                password: arg(1, "a password")?,
            },
            "list" => Self::List,
            "check" => Self::Check {
                name: arg(0, "a user name")?,
                password: arg(1, "a password")?,
            },
            "show" => Self::Show {
                name: arg(0, "a user name")?,
            },
            "set-param" => Self::SetParam {
                name: arg(0, "a user name")?,
                password: arg(1, "a password")?,
                key: arg(2, "a parameter key")?,
                value: arg(3, "a parameter value")?,
            },
            "rename" => Self::Rename {
                name: arg(0, "a user name")?,
                password: arg(1, "a password")?,
                new_name: arg(2, "the new user name")?,
            },
            "passwd" => Self::Passwd {
                name: arg(0, "a user name")?,
                old: arg(1, "the current password")?,
                new: arg(2, "the new password")?,
            },
            "--help" | "-h" | "help" => {
                print_usage();
                std::process::exit(0);
            }
            other => {
                return Err(anyhow!(
                    "Unknown command '{other}'. Run with --help for usage instructions."
                ));
            }
        };
        Ok(parsed)
    }
}

fn run(engine: &mut UserProfileEngine, command: Command) -> Result<()> {
    match command {
        Command::Add { name, password } => {
            engine.add_profile(&name, &password)?;
            println!("Added user {name}");
        }
        Command::Remove { name, password } => {
            engine.remove_profile(&name, &password)?;
            println!("Removed user {name}");
        }
        Command::List => {
            for user in engine.users_list()? {
                println!("{user}");
            }
        }
        Command::Check { name, password } => {
            let profile = engine.store().load(&name)?;
            if !profile.check_password(&password) {
                bail!("Password check failed for {name}");
            }
            println!("Password accepted for {name}");
        }
        Command::Show { name } => {
            let profile = engine.store().load(&name)?;
            println!("user:        {}", profile.user_name());
            println!("first name:  {}", profile.first_name());
            println!("last name:   {}", profile.last_name());
            println!("email:       {}", profile.email());
            println!("description: {}", profile.description());
            for (key, value) in profile.parameters() {
                println!("  {key} = {value}");
            }
        }
        Command::SetParam {
            name,
            password,
            key,
            value,
        } => {
            engine.login(&name, &password)?;
            engine.parameters_mut()?.set(key.clone(), value);
            engine.logout()?;
            println!("Set {key} for {name}");
        }
        Command::Rename {
            name,
            password,
            new_name,
        } => {
            engine.login(&name, &password)?;
            let renamed = engine.set_user_name(&password, &new_name)?;
            engine.logout()?;
            if !renamed {
                bail!("Could not rename {name} to {new_name}");
            }
            println!("Renamed {name} to {new_name}");
        }
        Command::Passwd { name, old, new } => {
            engine.login(&name, &old)?;
            engine.set_password(&old, &new, &new)?;
            engine.logout()?;
            println!("Password changed for {name}");
        }
    }
    Ok(())
}

fn print_usage() {
    println!("Workspace user profiles");
    println!("Usage: profilectl <command> [args]");
    println!("Commands:");
    println!("  add <user> <password>                    Create a bare profile");
    println!("  remove <user> <password>                 Delete a profile and its directory");
    println!("  list                                     List known users");
    println!("  check <user> <password>                  Verify a password");
    println!("  show <user>                              Print profile fields and parameters");
    println!("  set-param <user> <password> <key> <val>  Store a user parameter");
    println!("  rename <user> <password> <new-name>      Rename a user and their directory");
    println!("  passwd <user> <old> <new>                Change a password");
    println!("The workspace root defaults to the OS data directory; set JWORKSPACE_HOME to override.");
}
