//! The interactive command loop.
//!
//! Thin presentation over the session and the store: collects input, calls
//! into the core, prints results. Errors are printed and never kill the
//! shell; each command is its own unit of work.

use std::{io::Write as _, sync::Arc};

use kcal_core::{
  food::{Food, NewFood, daily_total},
  store::DiaryStore,
};
use kcal_session::{ProfileUpdate, Session};
use tokio::io::{AsyncBufReadExt as _, BufReader};

const HELP: &str = "\
commands:
  signup <name> <email> <password>   create an account and sign in
  login <email> <password>           sign in
  logout                             sign out
  whoami                             show the signed-in user
  log <name> <calories>              log a food for today
  today                              list today's foods and the total
  delete <food-id>                   delete a logged food by id
  goal <calories>                    set the daily calorie goal
  profile [name=<n>] [email=<e>]     update profile fields
  passwd <current> <new>             change the password
  recover <email> <new-password>     reset a password by email
  help                               show this text
  quit                               leave the shell";

pub async fn run<S>(
  mut session: Session<S>,
  store: Arc<S>,
  json: bool,
) -> anyhow::Result<()>
where
  S: DiaryStore,
{
  println!("kcal — type 'help' for commands");
  let mut lines = BufReader::new(tokio::io::stdin()).lines();

  loop {
    prompt(&session);
    let Some(line) = lines.next_line().await? else {
      break;
    };

    let args: Vec<&str> = line.split_whitespace().collect();
    if args.is_empty() {
      continue;
    }
    if !dispatch(&mut session, &store, json, &args).await {
      break;
    }
  }

  Ok(())
}

fn prompt<S>(session: &Session<S>)
where
  S: DiaryStore,
{
  match session.current_user() {
    Some(user) => print!("kcal ({})> ", user.name),
    None => print!("kcal> "),
  }
  std::io::stdout().flush().ok();
}

/// Execute one command line. Returns `false` when the shell should exit.
async fn dispatch<S>(
  session: &mut Session<S>,
  store: &Arc<S>,
  json: bool,
  args: &[&str],
) -> bool
where
  S: DiaryStore,
{
  match (args[0], &args[1..]) {
    ("help", _) => println!("{HELP}"),
    ("quit" | "exit", _) => return false,

    ("signup", [name, email, password]) => {
      match session.sign_up(name, email, password).await {
        Ok(()) => println!("welcome, {name}"),
        Err(e) => println!("error: {e}"),
      }
    }

    ("login", [email, password]) => match session.sign_in(email, password).await {
      Ok(()) => println!("signed in"),
      Err(e) => println!("error: {e}"),
    },

    ("logout", _) => {
      session.sign_out();
      println!("signed out");
    }

    ("whoami", _) => match session.current_user() {
      Some(user) => {
        print!("#{} {} <{}>", user.id, user.name, user.email);
        match user.calorie_goal {
          Some(goal) => println!(", goal {goal} kcal"),
          None => println!(", no goal set"),
        }
      }
      None => println!("not signed in"),
    },

    ("log", rest) if rest.len() >= 2 => {
      let Some(user) = session.current_user() else {
        println!("sign in first");
        return true;
      };
      let (calories_arg, name_args) = rest.split_last().unwrap_or((&"", &[]));
      let Ok(calories) = calories_arg.parse::<i64>() else {
        println!("error: calories must be a number, got {calories_arg:?}");
        return true;
      };
      let input = NewFood {
        name:     name_args.join(" "),
        calories,
        owner_id: user.id,
      };
      match store.create_food(input).await {
        Ok(id) => println!("logged #{id}"),
        Err(e) => println!("error: {e}"),
      }
    }

    ("today", _) => {
      let Some(user) = session.current_user() else {
        println!("sign in first");
        return true;
      };
      match store.list_foods_for_today(user.id).await {
        Ok(foods) => print_today(&foods, user.calorie_goal, json),
        Err(e) => println!("error: {e}"),
      }
    }

    ("delete", [id_arg]) => {
      if session.current_user().is_none() {
        println!("sign in first");
        return true;
      }
      let Ok(id) = id_arg.parse::<i64>() else {
        println!("error: food id must be a number, got {id_arg:?}");
        return true;
      };
      match store.delete_food(id).await {
        Ok(true) => println!("deleted #{id}"),
        Ok(false) => println!("no food with id {id}"),
        Err(e) => println!("error: {e}"),
      }
    }

    ("goal", [goal_arg]) => {
      let Ok(goal) = goal_arg.parse::<i64>() else {
        println!("error: goal must be a number, got {goal_arg:?}");
        return true;
      };
      match session.update_calorie_goal(goal).await {
        Ok(()) => println!("daily goal set to {goal} kcal"),
        Err(e) => println!("error: {e}"),
      }
    }

    ("profile", rest) if !rest.is_empty() => {
      let mut update = ProfileUpdate::default();
      for pair in rest {
        match pair.split_once('=') {
          Some(("name", value)) => update.name = Some(value.to_owned()),
          Some(("email", value)) => update.email = Some(value.to_owned()),
          _ => {
            println!("error: expected name=<n> or email=<e>, got {pair:?}");
            return true;
          }
        }
      }
      match session.update_profile(update).await {
        Ok(()) => println!("profile updated"),
        Err(e) => println!("error: {e}"),
      }
    }

    ("passwd", [current, new]) => {
      match session.change_password(current, new).await {
        Ok(()) => println!("password changed"),
        Err(e) => println!("error: {e}"),
      }
    }

    // The recovery flow from the login screen: prove the email exists, then
    // overwrite the password. No possession check — see DESIGN.md.
    ("recover", [email, new_password]) => {
      match store.find_user_by_email(email).await {
        Ok(None) => println!("no account for {email}"),
        Ok(Some(_)) => match store.update_password_by_email(email, new_password).await {
          Ok(0) => println!("password could not be updated"),
          Ok(_) => println!("password updated"),
          Err(e) => println!("error: {e}"),
        },
        Err(e) => println!("error: {e}"),
      }
    }

    _ => println!("unknown command; type 'help'"),
  }

  true
}

fn print_today(foods: &[Food], goal: Option<i64>, json: bool) {
  if json {
    match serde_json::to_string_pretty(foods) {
      Ok(out) => println!("{out}"),
      Err(e) => println!("error: {e}"),
    }
    return;
  }

  if foods.is_empty() {
    println!("nothing logged today");
  }
  for food in foods {
    println!("#{:<4} {:<24} {:>6} kcal", food.id, food.name, food.calories);
  }

  let total = daily_total(foods);
  println!("total: {total} kcal");
  if let Some(goal) = goal {
    println!("goal:  {goal} kcal ({} remaining)", goal - total);
  }
}
