use crate::value::Value;

impl Value {
    pub fn pr_str(&self) -> std::string::String {
        match self {
            Value::Number(n) => format!("{}", n),
            Value::Error(err) => format!("Error: {}", err),
            Value::Symbol(s) => s.to_string(),
            Value::SExpr(l) => pr_seq(l, "(", ")"),
        }
    }
}

fn pr_seq(seq: &[Value], start: &str, end: &str) -> std::string::String {
    let strs: Vec<std::string::String> = seq.iter().map(|x| x.pr_str()).collect();
    format!("{}{}{}", start, strs.join(" "), end)
}
