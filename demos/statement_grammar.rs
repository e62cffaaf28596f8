//! Statement Grammar
//!
//! This example wires a small statement grammar into a DFA and drives it with
//! a pre-tokenized input, building a flat list of syntax nodes from entry
//! callbacks.
//!
//! Key concepts:
//! - Token kinds double as transition labels
//! - Expression sub-graphs are stamped out per context with a name prefix
//! - Entry callbacks build nodes; the start state closes each statement
//!
//! Run with: cargo run --example statement_grammar

use lexdfa::{paths, MachineBuilder, MachineError};
use std::sync::{Arc, Mutex};

const START: &str = "start";
const NUMBER: &str = "number";
const QUOTED: &str = "quoted";
const IDENTIFIER: &str = "identifier";
const OPERATOR: &str = "operator";
const PAREN_OPEN: &str = "paren-open";
const PAREN_CLOSE: &str = "paren-close";
const SEMICOLON: &str = "semicolon";
const LET: &str = "let";
const EQUALS: &str = "equals";

#[derive(Default)]
struct Parser {
    tokens: Vec<(&'static str, &'static str)>,
    position: usize,
    nodes: Vec<String>,
}

impl Parser {
    fn current_text(&self) -> &'static str {
        self.tokens
            .get(self.position)
            .map(|(_, text)| *text)
            .unwrap_or_default()
    }

    fn node(parser: &Arc<Mutex<Parser>>, kind: &'static str) -> impl Fn() + Send + Sync + 'static {
        let parser = Arc::clone(parser);
        move || {
            let mut parser = parser.lock().unwrap();
            let text = parser.current_text();
            parser.nodes.push(format!("{kind}({text})"));
        }
    }
}

/// Adds an expression section reachable from `from` whose states carry
/// `prefix`, returning to `return_to` on `return_via`.
fn build_expr(
    builder: &mut MachineBuilder,
    parser: &Arc<Mutex<Parser>>,
    prefix: &str,
    from: &str,
    return_via: &str,
    return_to: &str,
) -> Result<(), lexdfa::BuildError> {
    let prefix = if prefix.is_empty() {
        "expr-".to_string()
    } else {
        format!("{prefix}-expr-")
    };
    let number = format!("{prefix}{NUMBER}");
    let quoted = format!("{prefix}{QUOTED}");
    let identifier = format!("{prefix}{IDENTIFIER}");
    let operator = format!("{prefix}{OPERATOR}");
    let paren_open = format!("{prefix}{PAREN_OPEN}");

    paths! {
        *builder;
        from => NUMBER => &number,
        from => QUOTED => &quoted,
        from => IDENTIFIER => &identifier,
        &identifier => OPERATOR => &operator,
        &identifier => PAREN_OPEN => &paren_open,
        &identifier => return_via => return_to,
        &paren_open => NUMBER => &number,
        &paren_open => QUOTED => &quoted,
        &operator => NUMBER => &number,
        &operator => IDENTIFIER => &identifier,
        &number => OPERATOR => &operator,
        &number => PAREN_CLOSE => from,
        &number => return_via => return_to,
        &quoted => PAREN_CLOSE => from,
        &quoted => return_via => return_to,
    }

    builder.when_entering(&number, Parser::node(parser, "number"))?;
    builder.when_entering(&quoted, Parser::node(parser, "string"))?;
    builder.when_entering(&identifier, Parser::node(parser, "identifier"))?;
    builder.when_entering(&operator, Parser::node(parser, "operator"))?;
    Ok(())
}

fn build(parser: &Arc<Mutex<Parser>>) -> Result<MachineBuilder, lexdfa::BuildError> {
    let mut builder = MachineBuilder::new();

    paths! {
        builder;
        START => SEMICOLON => START,
        START => LET => LET,
        LET => IDENTIFIER => "let-identifier",
        "let-identifier" => IDENTIFIER => "let-type-identifier",
        "let-type-identifier" => EQUALS => "let-equals",
    }
    build_expr(&mut builder, parser, "", START, SEMICOLON, START)?;
    build_expr(&mut builder, parser, "let", "let-equals", SEMICOLON, START)?;

    builder.when_entering(LET, Parser::node(parser, "let"))?;
    builder.when_entering("let-identifier", Parser::node(parser, "identifier"))?;
    builder.when_entering("let-type-identifier", Parser::node(parser, "type"))?;
    builder.when_entering(START, Parser::node(parser, "end-statement"))?;
    builder.accept(START)?;

    Ok(builder)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Statement Grammar Example ===\n");

    let parser = Arc::new(Mutex::new(Parser {
        // let total int = 1 + count; println("done");
        tokens: vec![
            (LET, "let"),
            (IDENTIFIER, "total"),
            (IDENTIFIER, "int"),
            (EQUALS, "="),
            (NUMBER, "1"),
            (OPERATOR, "+"),
            (IDENTIFIER, "count"),
            (SEMICOLON, ";"),
            (IDENTIFIER, "println"),
            (PAREN_OPEN, "("),
            (QUOTED, "done"),
            (PAREN_CLOSE, ")"),
            (SEMICOLON, ";"),
        ],
        ..Parser::default()
    }));

    let builder = build(&parser)?;
    println!(
        "Grammar has {} states and {} transitions",
        builder.state_count(),
        builder.describe().transition_count()
    );

    let labels: Vec<&str> = parser.lock().unwrap().tokens.iter().map(|(kind, _)| *kind).collect();
    let mut machine = builder.start(START)?;
    for (position, label) in labels.into_iter().enumerate() {
        parser.lock().unwrap().position = position;
        machine.transition(label)?;
    }

    match machine.finish() {
        Ok(()) => println!("Input accepted"),
        Err(MachineError::UnacceptableFinishState { state }) => {
            println!("Input incomplete, stopped in '{state}'")
        }
        Err(e) => return Err(e.into()),
    }

    println!("\nNodes:");
    for node in &parser.lock().unwrap().nodes {
        println!("  {node}");
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
