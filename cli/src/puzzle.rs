//! The puzzle: a side-7 hexagon, one pattern per line, clockwise starting
//! at the bottom of the lower-left edge.

pub const SIDE: usize = 7;

/// Rows left-to-right, then upper-right diagonals, then lower-right
/// diagonals, thirteen patterns per family.
pub const DEFINITIONS: [&str; 39] = [
    ".(C|HH)*",
    "R*D*M*",
    "N.*X.X.X.*E",
    "(RR|HHH)*.?",
    "([^X]|XCC)*",
    r"(...?)\1*",
    "[^C]*[^R]*III.*",
    "C*MC(CCC|MM)*",
    ".*",
    "(O|RHH|MM)*",
    "F.*[AO].*[AO].*",
    "(DI|NS|TH|OM)*",
    ".*H.*H.*",
    "(ND|ET|IN)[^X]*",
    "[CHMNOR]*I[CHMNOR]*",
    r"P+(..)\1.*",
    "(E|CR|MN)*",
    "([^MC]|MM|CC)*",
    "[AM]*CM(RC)*R?",
    ".*",
    ".*PRR.*DDC.*",
    "(HHX|[^HX])*",
    "([^EMC]|EM)*",
    ".*OXR.*",
    ".*LR.*RL.*",
    ".*SE.*UE.*",
    "(S|MM|HHH)*",
    "[^M]*M[^M]*",
    "(RX|[^R])*",
    "[CEIMU]*OH[AEMOR]*",
    r".*(.)C\1X\1.*",
    "[^C]*MMM[^C]*",
    ".*(IN|SE|HI)",
    r".*(.)(.)(.)(.)\4\3\2\1.*",
    ".*XHCR.*X.*",
    ".*DD.*CCM.*",
    ".*XEXM*",
    "[CR]*",
    ".*G.*V.*H.*",
];

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rexagon_engine::{LetterSet, Nfsm, Solver};

    const SOLUTION: [&str; 39] = [
        "GCCHHCC",
        "RRDDMMMM",
        "NCXDXEXLE",
        "RRRRHHHRRU",
        "VCXCCHHMXCC",
        "OREOREOREORE",
        "HRXRCMIIIHXLS",
        "CMCCCCMMMMMM",
        "MCXNMMCRXEM",
        "MMOMMMMRHH",
        "FOXNXAXPH",
        "DIOMOMTH",
        "NHPEHAS",
        "NDFMMCH",
        "HIOMCMRO",
        "POXOXCXRV",
        "EMNMNCRECR",
        "HOXMMCCOXRN",
        "AMAMMCMRCRCR",
        "STXMCMIECRXRG",
        "HPRRMIOHHDDC",
        "HHXMIRHHXDC",
        "HEMHEMHEMH",
        "MMXOXRXMH",
        "MLRCRLMC",
        "SECUEMC",
        "SMMHHHS",
        "ELMEHPTA",
        "CRXMXRXMH",
        "UCOHMRMAOE",
        "ERXEIMCMXMP",
        "MLRMRIMMMNOH",
        "CMXHHOICMMXIN",
        "CMEHHEMCNOOD",
        "HMXHCRCCXMF",
        "HDDRCORCCM",
        "CDXRXEXMM",
        "CRCRCRRC",
        "GRNRVOH",
    ];

    fn solve() -> (Solver, usize) {
        let mut solver = Solver::new(SIDE, LetterSet::ALL, &DEFINITIONS).unwrap();
        let rounds = solver.run(|_, _| {});
        (solver, rounds)
    }

    #[test]
    fn propagation_alone_solves_the_whole_board() {
        let (solver, rounds) = solve();
        assert!(rounds <= 26 * 127);
        assert!(solver.is_solved());

        let rendered: Vec<String> = solver.lines().map(|(_, cells)| cells).collect();
        assert_eq!(rendered, SOLUTION.to_vec());
    }

    #[test]
    fn every_line_of_the_solution_matches_its_pattern() {
        for (pattern, line) in DEFINITIONS.iter().zip(SOLUTION) {
            let nfsm = Nfsm::new(pattern, line.len(), LetterSet::ALL).unwrap();
            assert!(nfsm.matches(line), "{pattern} should match {line}");
        }
    }

    #[test]
    fn the_fixed_point_is_deterministic() {
        let (first, first_rounds) = solve();
        let (second, second_rounds) = solve();
        assert_eq!(first_rounds, second_rounds);
        assert_eq!(
            first.lines().collect::<Vec<_>>(),
            second.lines().collect::<Vec<_>>()
        );
    }
}
