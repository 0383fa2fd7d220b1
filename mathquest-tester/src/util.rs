use anyhow::{Result, anyhow};
use mathquest_game::Persona;

pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

/// Parse seed tokens; negative numbers map to their magnitude.
pub fn parse_seeds(tokens: &[String]) -> Result<Vec<u64>> {
    tokens
        .iter()
        .map(|token| {
            token
                .parse::<u64>()
                .or_else(|_| token.parse::<i64>().map(i64::unsigned_abs))
                .map_err(|_| anyhow!("invalid seed: {token}"))
        })
        .collect()
}

/// Resolve hero names; `all` expands to every hero in selection order.
pub fn parse_personas(tokens: &[String]) -> Result<Vec<Persona>> {
    let mut personas = Vec::new();
    for token in tokens {
        let token = token.to_lowercase();
        if token == "all" {
            for persona in Persona::ALL {
                if !personas.contains(&persona) {
                    personas.push(persona);
                }
            }
            continue;
        }
        let persona = token
            .parse::<Persona>()
            .map_err(|()| anyhow!("unknown hero: {token} (expected builder, explorer, scholar or all)"))?;
        if !personas.contains(&persona) {
            personas.push(persona);
        }
    }
    Ok(personas)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_csv_trims_and_filters() {
        let parts = split_csv(" alpha, ,beta,  gamma ");
        assert_eq!(parts, vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn seeds_accept_negative_numbers() {
        let seeds = parse_seeds(&split_csv("1337,-5")).unwrap();
        assert_eq!(seeds, vec![1337, 5]);
        assert!(parse_seeds(&split_csv("abc")).is_err());
    }

    #[test]
    fn personas_expand_all_without_duplicates() {
        let personas = parse_personas(&split_csv("scholar,ALL")).unwrap();
        assert_eq!(
            personas,
            vec![Persona::Scholar, Persona::Builder, Persona::Explorer]
        );
        assert!(parse_personas(&split_csv("wizard")).is_err());
    }
}
