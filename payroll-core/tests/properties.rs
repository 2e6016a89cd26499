//! Cross-engine properties checked over sweeps of the 2025 policy.

use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use payroll_core::calculations::{
    AllowanceAggregator, ContributionEngine, ProgressiveTaxEngine, SurchargeEngine, TaxSegment,
};
use payroll_core::{AllowanceInput, DeductionCalculator, PersonalProfile, PolicyYearConfig};

fn sweep(
    from: Decimal,
    to: Decimal,
    step: Decimal,
) -> impl Iterator<Item = Decimal> {
    let mut current = from;
    std::iter::from_fn(move || {
        if current > to {
            return None;
        }
        let value = current;
        current += step;
        Some(value)
    })
}

#[test]
fn income_tax_is_zero_up_to_base_allowance() {
    let policy = PolicyYearConfig::year_2025();
    let engine = ProgressiveTaxEngine::new(&policy.income_tax);

    for income in sweep(dec!(0), policy.income_tax.b0, dec!(97)) {
        assert_eq!(engine.compute(income).unwrap(), dec!(0));
    }
}

#[test]
fn income_tax_is_non_decreasing() {
    let policy = PolicyYearConfig::year_2025();
    let engine = ProgressiveTaxEngine::new(&policy.income_tax);

    let mut previous = Decimal::ZERO;
    for income in sweep(dec!(10000), dec!(320000), dec!(13)) {
        let tax = engine.compute(income).unwrap();
        assert!(tax >= previous, "income tax fell at {income}: {previous} -> {tax}");
        previous = tax;
    }
}

#[test]
fn income_tax_is_continuous_at_every_boundary() {
    let policy = PolicyYearConfig::year_2025();
    let schedule = &policy.income_tax;
    let engine = ProgressiveTaxEngine::new(schedule);

    for (boundary, lower, upper) in [
        (schedule.b1, TaxSegment::Entry, TaxSegment::Progression),
        (schedule.b2, TaxSegment::Progression, TaxSegment::Upper),
        (schedule.b3, TaxSegment::Upper, TaxSegment::Top),
    ] {
        let from_lower = schedule.segment_value(lower, boundary).floor();
        let from_upper = schedule.segment_value(upper, boundary).floor();
        assert!(
            (from_upper - from_lower).abs() <= Decimal::ONE,
            "segments disagree at {boundary}: {from_lower} vs {from_upper}"
        );

        let at = engine.compute(boundary).unwrap();
        let after = engine.compute(boundary + Decimal::ONE).unwrap();
        assert!(after >= at && after - at <= Decimal::ONE);
    }
}

#[test]
fn surcharge_equals_full_rate_above_phase_in_band() {
    let policy = PolicyYearConfig::year_2025();
    let engine = SurchargeEngine::new(&policy.surcharge);

    for is_married in [false, true] {
        let bound = policy.surcharge.phase_in_upper_bound(is_married).unwrap().ceil();
        for tax in sweep(bound, bound + dec!(50000), dec!(331)) {
            assert_eq!(
                engine.compute(tax, is_married).unwrap(),
                (tax * policy.surcharge.surcharge_rate).floor()
            );
        }
    }
}

#[test]
fn surcharge_is_zero_then_increasing() {
    let policy = PolicyYearConfig::year_2025();
    let engine = SurchargeEngine::new(&policy.surcharge);
    let threshold = policy.surcharge.threshold(false);

    for tax in sweep(dec!(0), threshold, dec!(250)) {
        assert_eq!(engine.compute(tax, false).unwrap(), dec!(0));
    }

    // Steps of 20 move both zone formulas by more than one unit.
    let mut previous = Decimal::ZERO;
    for tax in sweep(threshold + dec!(10), dec!(60000), dec!(20)) {
        let surcharge = engine.compute(tax, false).unwrap();
        assert!(surcharge > previous, "surcharge did not increase at {tax}");
        previous = surcharge;
    }
}

#[test]
fn contributions_rise_to_ceiling_and_stay_flat() {
    let policy = PolicyYearConfig::year_2025();
    let engine = ContributionEngine::new(&policy.contributions);
    let c = &policy.contributions;

    let checks: [(&str, Decimal, fn(&ContributionEngine<'_>, Decimal) -> Decimal); 4] = [
        ("pension", c.pension_ceiling, |e, g| e.pension(g).unwrap()),
        ("unemployment", c.unemployment_ceiling, |e, g| e.unemployment(g).unwrap()),
        ("health", c.health.ceiling, |e, g| e.health(g, dec!(2.5), false).unwrap()),
        ("nursing", c.nursing_care.ceiling, |e, g| e.nursing_care(g, 0, false).unwrap()),
    ];

    for (name, ceiling, contribution) in checks {
        let mut previous = Decimal::ZERO;
        for gross in sweep(dec!(0), ceiling, dec!(1234)) {
            let amount = contribution(&engine, gross);
            assert!(amount >= previous, "{name} fell at {gross}");
            previous = amount;
        }

        let at_ceiling = contribution(&engine, ceiling);
        for gross in sweep(ceiling, ceiling * dec!(4), dec!(9999)) {
            assert_eq!(contribution(&engine, gross), at_ceiling, "{name} not flat at {gross}");
        }
    }
}

#[test]
fn nursing_rate_never_below_minimum() {
    let policy = PolicyYearConfig::year_2025();
    let engine = ContributionEngine::new(&policy.contributions);

    for children in 0..20 {
        for in_saxony in [false, true] {
            assert!(
                engine.nursing_care_rate(children, in_saxony)
                    >= policy.contributions.nursing_care.minimum_employee_rate
            );
        }
    }
}

#[test]
fn married_never_pays_more_income_tax_than_single() {
    let policy = PolicyYearConfig::year_2025();
    let calculator = DeductionCalculator::new(&policy);
    let married = PersonalProfile {
        is_married: true,
        ..PersonalProfile::new()
    };

    for gross in sweep(dec!(0), dec!(400000), dec!(2777)) {
        let single = calculator
            .compute_breakdown(gross, &PersonalProfile::new())
            .unwrap();
        let couple = calculator.compute_breakdown(gross, &married).unwrap();

        assert!(couple.income_tax <= single.income_tax);
        assert!(couple.solidarity_surcharge <= single.solidarity_surcharge);
        if single.income_tax > Decimal::ZERO {
            assert!(couple.income_tax < single.income_tax, "equal tax at {gross}");
        }
    }
}

#[test]
fn breakdown_identities_hold_across_profiles() {
    let policy = PolicyYearConfig::year_2025();
    let calculator = DeductionCalculator::new(&policy);

    for children in 0..4 {
        for flags in 0..8u8 {
            let profile = PersonalProfile {
                is_married: flags & 1 != 0,
                is_church_member: flags & 2 != 0,
                is_in_saxony: flags & 4 != 0,
                num_children: children,
                is_single_parent: children > 0 && flags & 1 == 0,
                ..PersonalProfile::new()
            };
            for gross in sweep(dec!(0), dec!(200000), dec!(23456.78)) {
                let b = calculator.compute_breakdown(gross, &profile).unwrap();
                assert_eq!(b.total_deductions, b.total_taxes() + b.total_contributions());
                assert_eq!(b.net_income, gross - b.total_deductions);
                assert!(b.taxable_income >= Decimal::ZERO);
            }
        }
    }
}

#[test]
fn scenario_single_employee_at_30000() {
    let policy = PolicyYearConfig::year_2025();
    let calculator = DeductionCalculator::new(&policy);
    let expected_allowances = policy.allowances.base_personal_allowance
        + policy.allowances.employee_expense_allowance
        + policy.allowances.special_expenses_single;

    let breakdown = calculator
        .compute_breakdown(dec!(30000), &PersonalProfile::new())
        .unwrap();

    assert_eq!(
        AllowanceAggregator::new(&policy.allowances).compute(AllowanceInput::default()),
        expected_allowances
    );
    assert_eq!(breakdown.allowances, expected_allowances);
    assert_eq!(breakdown.taxable_income, dec!(30000) - expected_allowances);
    assert_eq!(breakdown.solidarity_surcharge, dec!(0));
    assert_eq!(breakdown.church_tax, dec!(0));
    assert_eq!(breakdown.pension_contribution, dec!(30000) * dec!(0.093));
    assert_eq!(breakdown.unemployment_contribution, dec!(30000) * dec!(0.013));
}

#[test]
fn scenario_contributions_independent_of_income_above_ceiling() {
    let policy = PolicyYearConfig::year_2025();
    let calculator = DeductionCalculator::new(&policy);

    let high = calculator
        .compute_breakdown(dec!(200000), &PersonalProfile::new())
        .unwrap();
    let very_high = calculator
        .compute_breakdown(dec!(2000000), &PersonalProfile::new())
        .unwrap();

    assert_eq!(high.total_contributions(), very_high.total_contributions());
    assert_eq!(high.pension_contribution, dec!(8983));
    assert_eq!(high.health_contribution, dec!(5655));
}
