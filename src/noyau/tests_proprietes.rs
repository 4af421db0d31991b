//! Propriétés (proptest) du rationnel non réduit.
//!
//! Référence indépendante : num_rational::BigRational (toujours réduit).
//! L’égalité brute (==) n’est utilisée que là où la représentation est connue ;
//! ailleurs on compare par valeur (compare_to / same_value).

use std::cmp::Ordering;

use num_integer::Integer;
use num_rational::BigRational;
use num_traits::One;
use proptest::prelude::*;

use super::decimal::Precision;
use super::rationnel::Rational;

fn petit_entier() -> impl Strategy<Value = i64> {
    -1000i64..1000i64
}

fn entier_non_nul() -> impl Strategy<Value = i64> {
    prop_oneof![(-1000i64..=-1i64), (1i64..=1000i64)]
}

fn rationnel() -> impl Strategy<Value = Rational> {
    (petit_entier(), entier_non_nul()).prop_map(|(n, d)| Rational::from_i64_pair(n, d).unwrap())
}

fn rationnel_non_nul() -> impl Strategy<Value = Rational> {
    (entier_non_nul(), entier_non_nul()).prop_map(|(n, d)| Rational::from_i64_pair(n, d).unwrap())
}

proptest! {
    #[test]
    fn ajout_puis_retrait(a in rationnel(), b in rationnel()) {
        let aller_retour = a.add(&b).subtract(&b);
        prop_assert_eq!(aller_retour.compare_to(&a), Ordering::Equal);
    }

    #[test]
    fn reduction_irreductible_et_meme_valeur(a in rationnel()) {
        let r = a.reduce();
        prop_assert!(r.numerator().gcd(r.denominator()).is_one());
        prop_assert_eq!(r.compare_to(&a), Ordering::Equal);
        prop_assert!(r.same_value(&a));
    }

    #[test]
    fn denominateur_toujours_positif(n in petit_entier(), d in entier_non_nul()) {
        let r = Rational::from_i64_pair(n, d).unwrap();
        prop_assert!(r.denominator() > &num_bigint::BigInt::from(0));
    }

    #[test]
    fn puissance_negative(a in rationnel_non_nul()) {
        let deux_puis_moins_un = a.pow(2).unwrap().pow(-1).unwrap();
        let moins_deux = a.pow(-2).unwrap();
        prop_assert!(deux_puis_moins_un.same_value(&moins_deux));
        prop_assert!(a.pow(0).unwrap().is_one());
    }

    #[test]
    fn texte_rationnel_relu(a in rationnel()) {
        let relu = Rational::parse(&a.to_rational_string()).unwrap();
        prop_assert!(relu.same_value(&a));
    }

    #[test]
    fn operations_comme_bigrational(a in rationnel(), b in rationnel_non_nul()) {
        let (ra, rb) = (a.to_big_rational(), b.to_big_rational());

        prop_assert!(a.add(&b).same_value(&Rational::from(&ra + &rb)));
        prop_assert!(a.subtract(&b).same_value(&Rational::from(&ra - &rb)));
        prop_assert!(a.multiply(&b).same_value(&Rational::from(&ra * &rb)));
        prop_assert!(a.divide(&b).unwrap().same_value(&Rational::from(&ra / &rb)));
    }

    #[test]
    fn ordre_comme_bigrational(a in rationnel(), b in rationnel()) {
        let attendu: Ordering = a.to_big_rational().cmp(&b.to_big_rational());
        prop_assert_eq!(a.compare_to(&b), attendu);
        prop_assert_eq!(b.compare_to(&a), attendu.reverse());
    }

    #[test]
    fn reduction_egale_bigrational(n in petit_entier(), d in entier_non_nul()) {
        let r = Rational::from_i64_pair(n, d).unwrap().reduce();
        let reference = BigRational::new(n.into(), d.into());
        prop_assert_eq!(r, Rational::from(reference));
    }

    #[test]
    fn decimal_encadre(a in rationnel()) {
        // |to_decimal(20) - a| <= 10^-15 pour |a| <= 1000
        let d = Rational::from(&a.to_decimal(Precision::new(20).unwrap()));
        let ecart = d.subtract(&a).abs();
        let borne = Rational::from_i64_pair(1, 1_000_000_000_000_000).unwrap();
        prop_assert_ne!(ecart.compare_to(&borne), Ordering::Greater);
    }
}
