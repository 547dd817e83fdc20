#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use pts_kernel::env::Environment;
    use pts_kernel::normalize::{beta_eq_terms, normalize_term};
    use pts_kernel::subst::{alpha_eq, subst};
    use pts_kernel::term::{Sort, Term};

    fn ty() -> Term {
        Term::sort(Sort::Type)
    }

    fn name(n: usize) -> String {
        format!("v{}", n % 7)
    }

    /// Builds a small, deterministic term family out of an integer seed so
    /// quickcheck's shrinker has something to work with beyond raw names.
    fn term_from_seed(seed: usize) -> Term {
        match seed % 5 {
            0 => Term::var(name(seed)),
            1 => Term::sort(if seed % 2 == 0 { Sort::Type } else { Sort::Kind }),
            2 => Term::lambda(name(seed), ty(), Term::var(name(seed))),
            3 => Term::app(
                Term::lambda(name(seed), ty(), Term::var(name(seed))),
                Term::var(name(seed + 1)),
            ),
            _ => Term::reference(format!("r{}", seed % 3), vec![Term::var(name(seed))]),
        }
    }

    quickcheck! {
        fn prop_alpha_eq_is_reflexive(seed: usize) -> bool {
            let t = term_from_seed(seed);
            alpha_eq(&t, &t)
        }
    }

    quickcheck! {
        fn prop_alpha_renaming_of_a_lambda_is_alpha_equivalent(seed: usize) -> bool {
            let x = name(seed);
            let y = name(seed + 1);
            if x == y {
                return true;
            }
            let original = Term::lambda(x.clone(), ty(), Term::var(x.clone()));
            let renamed = Term::lambda(y.clone(), ty(), Term::var(y));
            alpha_eq(&original, &renamed)
        }
    }

    quickcheck! {
        fn prop_substituting_a_variable_for_itself_is_the_identity(seed: usize) -> bool {
            let t = term_from_seed(seed);
            let v = name(seed);
            let unchanged = subst(&t, &v, &Term::var(v.clone()));
            alpha_eq(&t, &unchanged)
        }
    }

    quickcheck! {
        fn prop_substitution_of_a_fresh_variable_never_introduces_capture(seed: usize) -> bool {
            // \x:*. x  [x := bound-fresh] must still bind its own occurrence,
            // never leak the replacement's free variables into the binder.
            let bound = name(seed);
            let free = name(seed + 3);
            if bound == free {
                return true;
            }
            let t = Term::lambda(bound.clone(), ty(), Term::var(bound.clone()));
            let result = subst(&t, &free, &Term::var("replacement"));
            alpha_eq(&t, &result)
        }
    }

    quickcheck! {
        fn prop_beta_eq_is_reflexive(seed: usize) -> bool {
            let t = term_from_seed(seed);
            beta_eq_terms(&t, &t).unwrap_or(false)
        }
    }

    quickcheck! {
        fn prop_normalize_is_idempotent(seed: usize) -> bool {
            let t = term_from_seed(seed);
            let env = Environment::new();
            let once = match normalize_term(&t) {
                Ok(n) => n,
                Err(_) => return true,
            };
            let twice = match pts_kernel::normalize::normalize_in_env(&env, &once) {
                Ok(n) => n,
                Err(_) => return false,
            };
            alpha_eq(&once, &twice)
        }
    }

    quickcheck! {
        fn prop_identity_application_normalizes_to_its_argument(seed: usize) -> bool {
            let arg = Term::var(name(seed));
            let t = Term::app(Term::lambda("x", ty(), Term::var("x")), arg.clone());
            match normalize_term(&t) {
                Ok(result) => alpha_eq(&result, &arg),
                Err(_) => false,
            }
        }
    }

    quickcheck! {
        fn prop_reference_with_too_many_args_is_always_fatal(seed: usize, extra: usize) -> bool {
            use pts_kernel::delta::{delta_step, Mode};
            use pts_kernel::env::{Declaration, Param};
            use pts_kernel::CoreError;

            let mut env = Environment::new();
            env.register(Declaration::axiom(
                "f",
                vec![Param::new("p", ty())],
            ));
            let extra_args = (extra % 4) + 1;
            let args = (0..1 + extra_args).map(|i| Term::var(name(seed + i))).collect();
            let t = Term::reference("f", args);
            matches!(
                delta_step(&env, Mode::Global, &t),
                Err(CoreError::TooManyArgs { arity: 1, .. })
            )
        }
    }
}
